//! GoReleaser project configuration.
//!
//! Every top-level key of `.goreleaser.yaml` is known. Sections that carry
//! deprecated options are modelled as records with their full key set;
//! everything else is kept as free-form YAML, which is decoded but never
//! walked. Decoding is strict: unknown keys are rejected.

use crate::error::ConfigError;
use crate::inspect::{Inspect, Value};
use crate::record_schema;
use crate::schema::FieldKind;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Free-form YAML section.
pub type Section = serde_yaml::Value;

/// Root of a GoReleaser configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Project {
    /// Configuration file version
    pub version: u32,
    pub pro: bool,
    pub project_name: String,
    pub dist: String,
    pub env: Vec<String>,
    pub env_files: Section,
    pub before: Section,
    pub before_publish: Section,
    pub after: Section,
    pub builds: Vec<Build>,
    pub archives: Vec<Archive>,
    pub nfpms: Vec<Nfpm>,
    pub snaps: Vec<Snapcraft>,
    pub snapcrafts: Vec<Snapcraft>,
    pub kos: Vec<Ko>,
    pub homebrew_casks: Vec<HomebrewCask>,
    pub snapshot: Snapshot,
    pub nightly: Nightly,
    pub brews: Section,
    pub aurs: Section,
    pub aur_sources: Section,
    pub nix: Section,
    pub winget: Section,
    pub krews: Section,
    pub scoops: Section,
    pub chocolateys: Section,
    pub npms: Section,
    pub dockers: Section,
    pub docker_manifests: Section,
    pub dockers_v2: Section,
    pub docker_digest: Section,
    pub docker_signs: Section,
    pub dockerhub: Section,
    pub artifactories: Section,
    pub uploads: Section,
    pub blobs: Section,
    pub publishers: Section,
    pub furies: Section,
    pub cloudsmiths: Section,
    pub checksum: Section,
    pub signs: Section,
    pub binary_signs: Section,
    pub notarize: Section,
    pub sboms: Section,
    pub source: Section,
    pub universal_binaries: Section,
    pub upx: Section,
    pub app_bundles: Section,
    pub dmg: Section,
    pub msi: Section,
    pub pkgs: Section,
    pub nsis: Section,
    pub makeselfs: Section,
    pub flatpaks: Section,
    pub srpm: Section,
    pub release: Section,
    pub milestones: Section,
    pub changelog: Section,
    pub announce: Section,
    pub gomod: Section,
    pub git: Section,
    pub gitlab_urls: Section,
    pub gitea_urls: Section,
    pub github_urls: Section,
    pub force_token: String,
    pub metadata: Section,
    pub includes: Section,
    pub template_files: Section,
    pub partial: Section,
    pub monorepo: Section,
    pub retry: Section,
    /// Free-form template variables
    pub variables: HashMap<String, Section>,
    pub report_sizes: bool,
}

impl Project {
    /// Load a project from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        decode(&content)
    }
}

/// Strictly decode a project from YAML bytes.
///
/// An empty document, or one whose root is null, decodes to the default
/// project.
pub fn decode(bytes: &[u8]) -> Result<Project, ConfigError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Project::default());
    }
    let project: Option<Project> = serde_yaml::from_slice(bytes)?;
    Ok(project.unwrap_or_default())
}

/// A list that may also be written as a single item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => std::slice::from_ref(item),
        }
    }
}

// A single item is a one-element list.
impl<T: Inspect> Inspect for OneOrMany<T> {
    const KIND: FieldKind = <Vec<T> as Inspect>::KIND;

    fn inspect(&self) -> Value<'_> {
        Value::Sequence(self.as_slice().iter().map(Inspect::inspect).collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Build {
    pub id: String,
    pub builder: String,
    pub binary: String,
    pub main: String,
    pub dir: String,
    /// Replaced by `tool`
    pub gobinary: String,
    pub tool: String,
    pub command: String,
    pub goos: Vec<String>,
    pub goarch: Vec<String>,
    pub goarm: Vec<String>,
    pub goarm64: Vec<String>,
    pub goamd64: Vec<String>,
    pub go386: Vec<String>,
    pub gomips: Vec<String>,
    pub goppc64: Vec<String>,
    pub goriscv64: Vec<String>,
    pub targets: Vec<String>,
    pub ignore: Vec<Section>,
    pub overrides: Vec<Section>,
    pub ldflags: OneOrMany<String>,
    pub flags: OneOrMany<String>,
    pub tags: OneOrMany<String>,
    pub asmflags: OneOrMany<String>,
    pub gcflags: OneOrMany<String>,
    pub buildmode: String,
    pub env: Vec<String>,
    pub mod_timestamp: String,
    /// Boolean or template
    pub skip: Section,
    pub no_unique_dist_dir: Section,
    pub no_main_check: bool,
    pub hooks: BuildHooks,
    pub prebuilt: Section,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildHooks {
    pub pre: OneOrMany<Hook>,
    pub post: OneOrMany<Hook>,
}

/// A hook, either a bare command line or a full description.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Hook {
    Command(String),
    Spec(HookSpec),
}

impl Inspect for Hook {
    const KIND: FieldKind = FieldKind::Dynamic;

    fn inspect(&self) -> Value<'_> {
        match self {
            Hook::Command(cmd) => Value::Text(cmd),
            Hook::Spec(spec) => Value::Record(spec),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HookSpec {
    pub cmd: String,
    pub dir: String,
    pub env: Vec<String>,
    pub output: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Archive {
    pub id: String,
    /// Replaced by `ids`
    pub builds: Vec<String>,
    pub ids: Vec<String>,
    /// Replaced by `formats`
    pub format: String,
    pub formats: OneOrMany<String>,
    pub format_overrides: Vec<FormatOverride>,
    pub name_template: String,
    /// Boolean or directory name
    pub wrap_in_directory: Section,
    pub strip_binary_directory: bool,
    pub files: Vec<ArchiveFile>,
    pub templated_files: Vec<Section>,
    pub meta: bool,
    pub allow_different_binary_count: bool,
    pub builds_info: Section,
    pub hooks: Section,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatOverride {
    pub goos: String,
    /// Replaced by `formats`
    pub format: String,
    pub formats: OneOrMany<String>,
}

/// An extra archive file, either a glob or a source/destination pair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ArchiveFile {
    Glob(String),
    Entry(ArchiveFileEntry),
}

impl Inspect for ArchiveFile {
    const KIND: FieldKind = FieldKind::Dynamic;

    fn inspect(&self) -> Value<'_> {
        match self {
            ArchiveFile::Glob(glob) => Value::Text(glob),
            ArchiveFile::Entry(entry) => Value::Record(entry),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArchiveFileEntry {
    pub src: String,
    pub dst: String,
    pub strip_parent: bool,
    pub info: Section,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Nfpm {
    pub id: String,
    /// Replaced by `ids`
    pub builds: Vec<String>,
    pub ids: Vec<String>,
    #[serde(rename = "if")]
    pub condition: String,
    pub package_name: String,
    pub file_name_template: String,
    pub formats: Vec<String>,
    pub section: String,
    pub priority: String,
    pub vendor: String,
    pub homepage: String,
    pub maintainer: String,
    pub description: String,
    pub license: String,
    pub changelog: String,
    pub bindir: String,
    pub libdirs: Section,
    pub epoch: Section,
    pub release: Section,
    pub prerelease: String,
    pub version_metadata: String,
    pub meta: bool,
    pub umask: Section,
    pub mtime: String,
    pub dependencies: Vec<String>,
    pub recommends: Vec<String>,
    pub suggests: Vec<String>,
    pub conflicts: Vec<String>,
    pub replaces: Vec<String>,
    pub provides: Vec<String>,
    pub contents: Vec<NfpmContent>,
    pub templated_contents: Vec<Section>,
    pub scripts: Section,
    pub templated_scripts: Section,
    pub overrides: Section,
    pub rpm: Section,
    pub deb: Section,
    pub apk: Section,
    pub archlinux: Section,
    pub ipk: Section,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NfpmContent {
    pub src: String,
    pub dst: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub packager: String,
    pub file_info: Section,
    pub expand: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Snapcraft {
    pub id: String,
    /// Replaced by `ids`
    pub builds: Vec<String>,
    pub ids: Vec<String>,
    pub name_template: String,
    pub name: String,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub icon: String,
    pub base: String,
    pub license: String,
    pub grade: String,
    pub confinement: String,
    pub publish: bool,
    pub channel_templates: Vec<String>,
    pub disable: Section,
    pub assumes: Vec<String>,
    pub hooks: HashMap<String, Section>,
    pub apps: HashMap<String, Section>,
    pub plugs: HashMap<String, Section>,
    pub layout: HashMap<String, Section>,
    pub extra_files: Vec<Section>,
    pub templated_extra_files: Vec<Section>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Ko {
    pub id: String,
    pub build: String,
    pub main: String,
    pub working_dir: String,
    pub base_image: String,
    pub labels: HashMap<String, String>,
    pub annotations: HashMap<String, String>,
    pub user: String,
    /// Replaced by `repositories`
    pub repository: String,
    pub repositories: Vec<String>,
    pub platforms: Vec<String>,
    pub tags: Vec<String>,
    pub creation_time: String,
    pub ko_data_creation_time: String,
    /// Only `spdx` and `none` remain legal
    pub sbom: String,
    pub sbom_directory: String,
    pub ldflags: Vec<String>,
    pub flags: Vec<String>,
    pub env: Vec<String>,
    pub bare: bool,
    pub preserve_import_paths: bool,
    pub base_import_paths: bool,
    pub local_domain: String,
    pub disable: Section,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HomebrewCask {
    pub name: String,
    pub alternative_names: Vec<String>,
    pub ids: Vec<String>,
    #[serde(rename = "if")]
    pub condition: String,
    pub url: Section,
    pub description: String,
    pub homepage: String,
    pub license: String,
    pub caveats: String,
    pub custom_block: String,
    /// Replaced by `manpages`
    pub manpage: String,
    pub manpages: Vec<String>,
    /// Replaced by `binaries`
    pub binary: String,
    pub binaries: Vec<String>,
    pub completions: Section,
    pub generate_completions_from_executable: Section,
    pub service: String,
    pub dependencies: Vec<Section>,
    pub conflicts: Vec<HomebrewCaskConflict>,
    pub hooks: Section,
    pub uninstall: Section,
    pub zap: Section,
    pub repository: Section,
    pub commit_author: Section,
    pub commit_msg_template: String,
    pub directory: String,
    pub skip_upload: Section,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HomebrewCaskConflict {
    pub cask: String,
    /// Formula conflicts are no longer supported
    pub formula: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Snapshot {
    /// Replaced by `version_template`
    pub name_template: String,
    pub version_template: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Nightly {
    /// Replaced by `version_template`
    pub name_template: String,
    pub version_template: String,
    pub tag_name: String,
    pub publish_release: bool,
    pub keep_single_release: bool,
    pub draft: bool,
}

record_schema! {
    Project {
        version => "version",
        pro => "pro",
        project_name => "project_name",
        dist => "dist",
        env => "env",
        env_files => "env_files",
        before => "before",
        before_publish => "before_publish",
        after => "after",
        builds => "builds",
        archives => "archives",
        nfpms => "nfpms",
        snaps => "snaps",
        snapcrafts => "snapcrafts",
        kos => "kos",
        homebrew_casks => "homebrew_casks",
        snapshot => "snapshot",
        nightly => "nightly",
        brews => "brews",
        aurs => "aurs",
        aur_sources => "aur_sources",
        nix => "nix",
        winget => "winget",
        krews => "krews",
        scoops => "scoops",
        chocolateys => "chocolateys",
        npms => "npms",
        dockers => "dockers",
        docker_manifests => "docker_manifests",
        dockers_v2 => "dockers_v2",
        docker_digest => "docker_digest",
        docker_signs => "docker_signs",
        dockerhub => "dockerhub",
        artifactories => "artifactories",
        uploads => "uploads",
        blobs => "blobs",
        publishers => "publishers",
        furies => "furies",
        cloudsmiths => "cloudsmiths",
        checksum => "checksum",
        signs => "signs",
        binary_signs => "binary_signs",
        notarize => "notarize",
        sboms => "sboms",
        source => "source",
        universal_binaries => "universal_binaries",
        upx => "upx",
        app_bundles => "app_bundles",
        dmg => "dmg",
        msi => "msi",
        pkgs => "pkgs",
        nsis => "nsis",
        makeselfs => "makeselfs",
        flatpaks => "flatpaks",
        srpm => "srpm",
        release => "release",
        milestones => "milestones",
        changelog => "changelog",
        announce => "announce",
        gomod => "gomod",
        git => "git",
        gitlab_urls => "gitlab_urls",
        gitea_urls => "gitea_urls",
        github_urls => "github_urls",
        force_token => "force_token",
        metadata => "metadata",
        includes => "includes",
        template_files => "template_files",
        partial => "partial",
        monorepo => "monorepo",
        retry => "retry",
        variables => "variables",
        report_sizes => "report_sizes",
    }

    Build {
        id => "id",
        builder => "builder",
        binary => "binary",
        main => "main",
        dir => "dir",
        gobinary => "gobinary" [deprecated],
        tool => "tool",
        command => "command",
        goos => "goos",
        goarch => "goarch",
        goarm => "goarm",
        goarm64 => "goarm64",
        goamd64 => "goamd64",
        go386 => "go386",
        gomips => "gomips",
        goppc64 => "goppc64",
        goriscv64 => "goriscv64",
        targets => "targets",
        ignore => "ignore",
        overrides => "overrides",
        ldflags => "ldflags",
        flags => "flags",
        tags => "tags",
        asmflags => "asmflags",
        gcflags => "gcflags",
        buildmode => "buildmode",
        env => "env",
        mod_timestamp => "mod_timestamp",
        skip => "skip",
        no_unique_dist_dir => "no_unique_dist_dir",
        no_main_check => "no_main_check",
        hooks => "hooks",
        prebuilt => "prebuilt",
    }

    BuildHooks {
        pre => "pre",
        post => "post",
    }

    HookSpec {
        cmd => "cmd",
        dir => "dir",
        env => "env",
        output => "output",
    }

    Archive {
        id => "id",
        builds => "builds" [deprecated],
        ids => "ids",
        format => "format" [deprecated],
        formats => "formats",
        format_overrides => "format_overrides",
        name_template => "name_template",
        wrap_in_directory => "wrap_in_directory",
        strip_binary_directory => "strip_binary_directory",
        files => "files",
        templated_files => "templated_files",
        meta => "meta",
        allow_different_binary_count => "allow_different_binary_count",
        builds_info => "builds_info",
        hooks => "hooks",
    }

    FormatOverride {
        goos => "goos",
        format => "format" [deprecated],
        formats => "formats",
    }

    ArchiveFileEntry {
        src => "src",
        dst => "dst",
        strip_parent => "strip_parent",
        info => "info",
    }

    Nfpm {
        id => "id",
        builds => "builds" [deprecated],
        ids => "ids",
        condition => "if",
        package_name => "package_name",
        file_name_template => "file_name_template",
        formats => "formats",
        section => "section",
        priority => "priority",
        vendor => "vendor",
        homepage => "homepage",
        maintainer => "maintainer",
        description => "description",
        license => "license",
        changelog => "changelog",
        bindir => "bindir",
        libdirs => "libdirs",
        epoch => "epoch",
        release => "release",
        prerelease => "prerelease",
        version_metadata => "version_metadata",
        meta => "meta",
        umask => "umask",
        mtime => "mtime",
        dependencies => "dependencies",
        recommends => "recommends",
        suggests => "suggests",
        conflicts => "conflicts",
        replaces => "replaces",
        provides => "provides",
        contents => "contents",
        templated_contents => "templated_contents",
        scripts => "scripts",
        templated_scripts => "templated_scripts",
        overrides => "overrides",
        rpm => "rpm",
        deb => "deb",
        apk => "apk",
        archlinux => "archlinux",
        ipk => "ipk",
    }

    NfpmContent {
        src => "src",
        dst => "dst",
        kind => "type",
        packager => "packager",
        file_info => "file_info",
        expand => "expand",
    }

    Snapcraft {
        id => "id",
        builds => "builds" [deprecated],
        ids => "ids",
        name_template => "name_template",
        name => "name",
        title => "title",
        summary => "summary",
        description => "description",
        icon => "icon",
        base => "base",
        license => "license",
        grade => "grade",
        confinement => "confinement",
        publish => "publish",
        channel_templates => "channel_templates",
        disable => "disable",
        assumes => "assumes",
        hooks => "hooks",
        apps => "apps",
        plugs => "plugs",
        layout => "layout",
        extra_files => "extra_files",
        templated_extra_files => "templated_extra_files",
    }

    Ko {
        id => "id",
        build => "build",
        main => "main",
        working_dir => "working_dir",
        base_image => "base_image",
        labels => "labels",
        annotations => "annotations",
        user => "user",
        repository => "repository" [deprecated],
        repositories => "repositories",
        platforms => "platforms",
        tags => "tags",
        creation_time => "creation_time",
        ko_data_creation_time => "ko_data_creation_time",
        sbom => "sbom",
        sbom_directory => "sbom_directory",
        ldflags => "ldflags",
        flags => "flags",
        env => "env",
        bare => "bare",
        preserve_import_paths => "preserve_import_paths",
        base_import_paths => "base_import_paths",
        local_domain => "local_domain",
        disable => "disable",
    }

    HomebrewCask {
        name => "name",
        alternative_names => "alternative_names",
        ids => "ids",
        condition => "if",
        url => "url",
        description => "description",
        homepage => "homepage",
        license => "license",
        caveats => "caveats",
        custom_block => "custom_block",
        manpage => "manpage" [deprecated],
        manpages => "manpages",
        binary => "binary" [deprecated],
        binaries => "binaries",
        completions => "completions",
        generate_completions_from_executable => "generate_completions_from_executable",
        service => "service",
        dependencies => "dependencies",
        conflicts => "conflicts",
        hooks => "hooks",
        uninstall => "uninstall",
        zap => "zap",
        repository => "repository",
        commit_author => "commit_author",
        commit_msg_template => "commit_msg_template",
        directory => "directory",
        skip_upload => "skip_upload",
    }

    HomebrewCaskConflict {
        cask => "cask",
        formula => "formula" [deprecated],
    }

    Snapshot {
        name_template => "name_template" [deprecated],
        version_template => "version_template",
    }

    Nightly {
        name_template => "name_template" [deprecated],
        version_template => "version_template",
        tag_name => "tag_name",
        publish_release => "publish_release",
        keep_single_release => "keep_single_release",
        draft => "draft",
    }
}
