//! Build plan registry.
//!
//! The registry is built once at startup: every declared variant is run
//! through the [`VariantResolver`] and stored with its resolved arguments,
//! next to the global options (source directory, build-directory rule and
//! environment) and the named build-and-run targets.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::builder::build_dir::{BuildDirOptions, BuildDirRule, ConfigNameDir};
use crate::core::{BuildTarget, BuildVariantRequest, CliArgs};
use crate::resolver::{FsProbe, ResolvedArgs, VariantResolver, WarningSink};
use crate::util::diagnostic::{join_names, VariaError};

/// Environment variables injected into every CMake and target process.
pub type EnvVars = BTreeMap<String, String>;

/// Default source directory.
pub const DEFAULT_SRC_DIR: &str = ".";

/// Default LeakSanitizer options, relative to `build/<config>/bin`.
pub const DEFAULT_LSAN_OPTIONS: &str = "suppressions=../../../lsan_suppress.txt";

/// Options shared by every variant.
#[derive(Debug, Clone)]
pub struct GlobalOptions<R = ConfigNameDir> {
    pub src_dir: PathBuf,
    pub build_dir: R,
    pub env: EnvVars,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        let mut env = EnvVars::new();
        env.insert("LSAN_OPTIONS".to_string(), DEFAULT_LSAN_OPTIONS.to_string());

        GlobalOptions {
            src_dir: PathBuf::from(DEFAULT_SRC_DIR),
            build_dir: ConfigNameDir::default(),
            env,
        }
    }
}

/// A declared variant with its resolved arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    pub request: BuildVariantRequest,
    pub args: ResolvedArgs,
}

impl Variant {
    fn dir_options(&self) -> BuildDirOptions<'_> {
        BuildDirOptions {
            variant: &self.name,
            toolchain: &self.request.toolchain,
            build_config_name: &self.request.build_config_name,
        }
    }
}

/// The default variant table: clang in Debug, Sanitize and Release.
pub fn default_variants() -> Vec<(String, BuildVariantRequest)> {
    ["Debug", "Sanitize", "Release"]
        .into_iter()
        .map(|config| {
            let request = BuildVariantRequest::new("clang", config);
            (request.to_string(), request)
        })
        .collect()
}

/// The default run targets.
pub fn default_targets() -> Vec<BuildTarget> {
    vec![BuildTarget::new("c2ffi")
        .build_step("c2ffi")
        .run("./c2ffi")
        .args("/usr/include/stdio.h")
        .cwd("bin")]
}

/// Named variants and build-and-run targets.
#[derive(Debug, Clone)]
pub struct BuildPlanRegistry<R = ConfigNameDir> {
    options: GlobalOptions<R>,
    variants: Vec<Variant>,
    targets: Vec<BuildTarget>,
}

impl BuildPlanRegistry {
    /// The built-in plan.
    pub fn with_defaults<P: FsProbe, W: WarningSink>(resolver: &VariantResolver<P, W>) -> Self {
        BuildPlanRegistry::construct(
            resolver,
            GlobalOptions::default(),
            default_variants(),
            default_targets(),
        )
    }
}

impl<R: BuildDirRule> BuildPlanRegistry<R> {
    /// Resolve every declared variant and assemble the registry.
    ///
    /// Resolution happens once per variant, in declaration order. A later
    /// declaration with an already-used name replaces the earlier one in place.
    pub fn construct<P: FsProbe, W: WarningSink>(
        resolver: &VariantResolver<P, W>,
        options: GlobalOptions<R>,
        declared: impl IntoIterator<Item = (String, BuildVariantRequest)>,
        targets: impl IntoIterator<Item = BuildTarget>,
    ) -> Self {
        let mut variants: Vec<Variant> = Vec::new();

        for (name, request) in declared {
            let args = resolver.resolve(&request);
            tracing::debug!("variant {}: {}", name, args);

            let variant = Variant {
                name,
                request,
                args,
            };
            match variants.iter_mut().find(|v| v.name == variant.name) {
                Some(existing) => *existing = variant,
                None => variants.push(variant),
            }
        }

        BuildPlanRegistry {
            options,
            variants,
            targets: targets.into_iter().collect(),
        }
    }

    pub fn options(&self) -> &GlobalOptions<R> {
        &self.options
    }

    pub fn src_dir(&self) -> &Path {
        &self.options.src_dir
    }

    pub fn env(&self) -> &EnvVars {
        &self.options.env
    }

    /// Variants in declaration order.
    pub fn variants(&self) -> impl Iterator<Item = &Variant> {
        self.variants.iter()
    }

    /// Targets in declaration order.
    pub fn targets(&self) -> impl Iterator<Item = &BuildTarget> {
        self.targets.iter()
    }

    /// Look up a variant by name.
    pub fn variant(&self, name: &str) -> Result<&Variant, VariaError> {
        self.variants
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| VariaError::UnknownVariant {
                name: name.to_string(),
                available: join_names(self.variants.iter().map(|v| v.name.as_str())),
            })
    }

    /// The first declared variant.
    pub fn default_variant(&self) -> Result<&Variant, VariaError> {
        self.variants.first().ok_or(VariaError::NoVariants)
    }

    /// Look up `name`, or fall back to the first declared variant.
    pub fn variant_or_default(&self, name: Option<&str>) -> Result<&Variant, VariaError> {
        match name {
            Some(name) => self.variant(name),
            None => self.default_variant(),
        }
    }

    /// Look up a build-and-run target by name.
    pub fn target(&self, name: &str) -> Result<&BuildTarget, VariaError> {
        self.targets
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| VariaError::UnknownTarget {
                name: name.to_string(),
                available: join_names(self.targets.iter().map(|t| t.name.as_str())),
            })
    }

    /// Evaluate the build-directory rule for `variant`.
    pub fn build_dir(&self, variant: &Variant) -> PathBuf {
        self.options.build_dir.build_dir(&variant.dir_options())
    }

    /// The configuration object consumed by the task runner.
    pub fn to_task_config(&self) -> TaskConfig {
        let configs = self
            .variants
            .iter()
            .map(|v| {
                let record = TaskVariant {
                    options: TaskVariantOptions {
                        args: v.args.argument_string().to_string(),
                        build_dir: self.build_dir(v).display().to_string(),
                    },
                };
                (v.name.clone(), record)
            })
            .collect();

        let cmake_run = self
            .targets
            .iter()
            .map(|t| {
                let entry = TaskRun {
                    build: t.build_step_name.clone(),
                    run: t.run_executable_path.display().to_string(),
                    args: t.cli_args.clone(),
                    cwd: t.working_directory.display().to_string(),
                };
                (t.name.clone(), entry)
            })
            .collect();

        TaskConfig {
            cmake_config: TaskCMakeConfig {
                options: TaskGlobalOptions {
                    src_dir: self.options.src_dir.display().to_string(),
                    env: self.options.env.clone(),
                },
                configs,
            },
            cmake_run,
        }
    }
}

/// Serialized form of the whole plan. Maps keep declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct TaskConfig {
    pub cmake_config: TaskCMakeConfig,
    pub cmake_run: IndexMap<String, TaskRun>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskCMakeConfig {
    pub options: TaskGlobalOptions,
    pub configs: IndexMap<String, TaskVariant>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskGlobalOptions {
    pub src_dir: String,
    pub env: EnvVars,
}

/// Per-variant record: `{options: {args, buildDir}}`.
#[derive(Debug, Clone, Serialize)]
pub struct TaskVariant {
    pub options: TaskVariantOptions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskVariantOptions {
    pub args: String,
    pub build_dir: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskRun {
    pub build: String,
    pub run: String,
    pub args: CliArgs,
    pub cwd: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{package_local_path, RecordingSink, StaticProbe};

    fn registry(probe: StaticProbe) -> (BuildPlanRegistry, Vec<String>) {
        let sink = RecordingSink::new();
        let resolver = VariantResolver::new(probe, &sink);
        let registry = BuildPlanRegistry::with_defaults(&resolver);
        (registry, sink.messages())
    }

    #[test]
    fn test_default_variants_in_order() {
        let (reg, _) = registry(StaticProbe::new("/home/dev"));
        let names: Vec<&str> = reg.variants().map(|v| v.name.as_str()).collect();

        assert_eq!(names, vec!["clang-Debug", "clang-Sanitize", "clang-Release"]);
        assert_eq!(reg.default_variant().unwrap().name, "clang-Debug");
    }

    #[test]
    fn test_resolver_called_once_per_variant() {
        let (_, warnings) = registry(StaticProbe::new("/home/dev"));
        assert_eq!(warnings.len(), 3);

        let home = PathBuf::from("/home/dev");
        let probe = StaticProbe::new(&home).with_file(package_local_path(&home));
        let (reg, warnings) = registry(probe);
        assert!(warnings.is_empty());
        for v in reg.variants() {
            assert!(v.args.argument_string().starts_with("-C "));
        }
    }

    #[test]
    fn test_variant_args() {
        let (reg, _) = registry(StaticProbe::new("/home/dev"));
        let v = reg.variant("clang-Sanitize").unwrap();

        assert_eq!(
            v.args.argument_string(),
            "-DTOOLCHAIN=clang -DBUILD_CONFIG=Sanitize "
        );
    }

    #[test]
    fn test_build_dirs() {
        let (reg, _) = registry(StaticProbe::new("/home/dev"));
        let dirs: Vec<PathBuf> = reg.variants().map(|v| reg.build_dir(v)).collect();

        assert_eq!(
            dirs,
            vec![
                PathBuf::from("build/Debug"),
                PathBuf::from("build/Sanitize"),
                PathBuf::from("build/Release"),
            ]
        );
    }

    #[test]
    fn test_default_env_and_src_dir() {
        let (reg, _) = registry(StaticProbe::new("/home/dev"));

        assert_eq!(reg.src_dir(), Path::new("."));
        assert_eq!(
            reg.env().get("LSAN_OPTIONS").map(String::as_str),
            Some(DEFAULT_LSAN_OPTIONS)
        );
    }

    #[test]
    fn test_unknown_names() {
        let (reg, _) = registry(StaticProbe::new("/home/dev"));

        let err = reg.variant("gcc-Debug").unwrap_err();
        assert!(matches!(err, VariaError::UnknownVariant { ref available, .. }
            if available == "clang-Debug, clang-Sanitize, clang-Release"));

        let err = reg.target("nope").unwrap_err();
        assert!(matches!(err, VariaError::UnknownTarget { ref available, .. } if available == "c2ffi"));
    }

    #[test]
    fn test_default_target() {
        let (reg, _) = registry(StaticProbe::new("/home/dev"));
        let t = reg.target("c2ffi").unwrap();

        assert_eq!(t.build_step_name, "c2ffi");
        assert_eq!(t.run_executable_path, PathBuf::from("./c2ffi"));
        assert_eq!(t.working_directory, PathBuf::from("bin"));
        assert_eq!(t.cli_args, CliArgs::from("/usr/include/stdio.h"));
    }

    #[test]
    fn test_redeclared_variant_replaces_in_place() {
        let sink = RecordingSink::new();
        let resolver = VariantResolver::new(StaticProbe::new("/home/dev"), &sink);
        let declared = vec![
            ("a".to_string(), BuildVariantRequest::new("clang", "Debug")),
            ("b".to_string(), BuildVariantRequest::new("clang", "Release")),
            ("a".to_string(), BuildVariantRequest::new("gcc", "Debug")),
        ];
        let reg = BuildPlanRegistry::construct(&resolver, GlobalOptions::default(), declared, vec![]);

        let names: Vec<&str> = reg.variants().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(reg.variant("a").unwrap().request.toolchain, "gcc");
    }

    #[test]
    fn test_custom_build_dir_rule() {
        fn per_variant(opts: &BuildDirOptions<'_>) -> PathBuf {
            PathBuf::from("out").join(opts.variant)
        }

        let sink = RecordingSink::new();
        let resolver = VariantResolver::new(StaticProbe::new("/home/dev"), &sink);
        let options = GlobalOptions {
            src_dir: PathBuf::from("."),
            build_dir: per_variant,
            env: EnvVars::new(),
        };
        let reg = BuildPlanRegistry::construct(&resolver, options, default_variants(), vec![]);
        let v = reg.variant("clang-Release").unwrap();

        assert_eq!(reg.build_dir(v), PathBuf::from("out/clang-Release"));
    }

    #[test]
    fn test_empty_plan_has_no_default() {
        let sink = RecordingSink::new();
        let resolver = VariantResolver::new(StaticProbe::new("/home/dev"), &sink);
        let reg = BuildPlanRegistry::construct(&resolver, GlobalOptions::default(), vec![], vec![]);

        assert!(matches!(reg.default_variant(), Err(VariaError::NoVariants)));
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn test_task_config_json() {
        let (reg, _) = registry(StaticProbe::new("/home/dev"));
        let json = serde_json::to_value(reg.to_task_config()).unwrap();

        assert_eq!(json["cmake_config"]["options"]["srcDir"], ".");
        assert_eq!(
            json["cmake_config"]["options"]["env"]["LSAN_OPTIONS"],
            DEFAULT_LSAN_OPTIONS
        );
        assert_eq!(
            json["cmake_config"]["configs"]["clang-Debug"]["options"]["args"],
            "-DTOOLCHAIN=clang -DBUILD_CONFIG=Debug "
        );
        assert_eq!(
            json["cmake_config"]["configs"]["clang-Release"]["options"]["buildDir"],
            "build/Release"
        );
        assert_eq!(
            json["cmake_run"]["c2ffi"],
            serde_json::json!({
                "build": "c2ffi",
                "run": "./c2ffi",
                "args": "/usr/include/stdio.h",
                "cwd": "bin"
            })
        );
    }

    #[test]
    fn test_task_config_keeps_declaration_order() {
        let sink = RecordingSink::new();
        let resolver = VariantResolver::new(StaticProbe::new("/home/dev"), &sink);
        let declared = vec![
            ("zeta".to_string(), BuildVariantRequest::new("clang", "Debug")),
            ("alpha".to_string(), BuildVariantRequest::new("clang", "Release")),
        ];
        let targets = vec![BuildTarget::new("zz"), BuildTarget::new("aa")];
        let reg = BuildPlanRegistry::construct(&resolver, GlobalOptions::default(), declared, targets);

        let task = reg.to_task_config();
        let configs: Vec<&str> = task.cmake_config.configs.keys().map(String::as_str).collect();
        let runs: Vec<&str> = task.cmake_run.keys().map(String::as_str).collect();
        assert_eq!(configs, vec!["zeta", "alpha"]);
        assert_eq!(runs, vec!["zz", "aa"]);

        let json = serde_json::to_string(&task).unwrap();
        let zeta = json.find("\"zeta\"").unwrap();
        let alpha = json.find("\"alpha\"").unwrap();
        assert!(zeta < alpha);
    }
}
