//! Pipeline orchestrator.

use std::path::PathBuf;

use eyre::Result;
use valgen_core::Config;
use valgen_rules::RuleRegistry;

use super::{
    CompilationContext, Phase, PhaseInfo, Plugin,
    phases::{CollectPhase, IndexPhase, LintPhase, ParsePhase},
};

/// Runs the built-in phases (parse, index, collect, lint) followed by any
/// user phases, calling plugin hooks around each one.
///
/// A pipeline holds no per-file state and can be shared across threads.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .plugin(TracingPlugin)
///     .phase(MyCustomPhase);
///
/// let ctx = pipeline.run("types.go", src, &config, &registry)?;
/// ```
pub struct Pipeline {
    builtin: Vec<Box<dyn Phase>>,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            builtin: vec![
                Box::new(ParsePhase),
                Box::new(IndexPhase),
                Box::new(CollectPhase),
                Box::new(LintPhase::new()),
            ],
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run every phase on one source file.
    ///
    /// # Errors
    ///
    /// Returns the first fatal phase error. Syntax errors and directive
    /// errors keep their concrete type so callers can downcast them for
    /// rich rendering.
    pub fn run<'a>(
        &self,
        path: impl Into<PathBuf>,
        src: impl Into<String>,
        config: &'a Config,
        registry: &'a RuleRegistry,
    ) -> Result<CompilationContext<'a>> {
        let mut ctx = CompilationContext::new(path, src, config, registry);

        for phase in self.builtin.iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let phase_name = phase.name();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }

    /// Names of all phases in execution order.
    pub fn phase_names(&self) -> Vec<&'static str> {
        self.builtin
            .iter()
            .chain(self.phases.iter())
            .map(|p| p.name())
            .collect()
    }

    /// Name and description of all phases in execution order.
    pub fn phase_info(&self) -> Vec<PhaseInfo> {
        self.builtin
            .iter()
            .chain(self.phases.iter())
            .map(|p| p.info())
            .collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    struct CountingPlugin {
        before_count: Arc<AtomicUsize>,
        after_count: Arc<AtomicUsize>,
    }

    impl CountingPlugin {
        fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let before = Arc::new(AtomicUsize::new(0));
            let after = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    before_count: before.clone(),
                    after_count: after.clone(),
                },
                before,
                after,
            )
        }
    }

    impl Plugin for CountingPlugin {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_before_phase(&self, _phase: &str, _ctx: &mut CompilationContext<'_>) -> Result<()> {
            self.before_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_after_phase(&self, _phase: &str, _ctx: &mut CompilationContext<'_>) -> Result<()> {
            self.after_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    const SRC: &str = r#"package v1

// +generate:validate
type Endpoint struct {
	// +validate(length(min=1))
	Address string
}
"#;

    #[test]
    fn test_pipeline_runs_phases() {
        let config = Config::default();
        let registry = RuleRegistry::default();

        let mut ctx = Pipeline::new()
            .run("endpoint.go", SRC, &config, &registry)
            .expect("pipeline should succeed");

        assert!(ctx.file.is_some());
        assert_eq!(ctx.index.as_ref().map(|i| i.len()), Some(1));
        let info = ctx.take_info().unwrap();
        assert_eq!(info.package, "v1");
        assert_eq!(info.declarations[0].name, "Endpoint");
    }

    #[test]
    fn test_pipeline_plugin_hooks() {
        let config = Config::default();
        let registry = RuleRegistry::default();
        let (plugin, before_count, after_count) = CountingPlugin::new();

        let pipeline = Pipeline::new().plugin(plugin).plugin(crate::pipeline::TracingPlugin);
        pipeline
            .run("endpoint.go", SRC, &config, &registry)
            .expect("pipeline should succeed");

        // 4 built-in phases = 4 before + 4 after hooks
        assert_eq!(before_count.load(Ordering::SeqCst), 4);
        assert_eq!(after_count.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_user_phase_runs_last() {
        struct Marker;
        impl Phase for Marker {
            fn name(&self) -> &'static str {
                "marker"
            }
            fn description(&self) -> &'static str {
                "adds a warning"
            }
            fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
                assert!(ctx.info.is_some());
                ctx.add_warning("marker", "seen");
                Ok(())
            }
        }

        let config = Config::default();
        let registry = RuleRegistry::default();
        let pipeline = Pipeline::new().phase(Marker);
        assert_eq!(
            pipeline.phase_names(),
            vec!["parse", "index", "collect", "lint", "marker"]
        );

        let ctx = pipeline.run("endpoint.go", SRC, &config, &registry).unwrap();
        assert_eq!(ctx.warning_count(), 1);
    }

    #[test]
    fn test_syntax_error_keeps_its_type() {
        let config = Config::default();
        let registry = RuleRegistry::default();
        let err = Pipeline::new()
            .run("bad.go", "package v1\n\ntype A struct {\n", &config, &registry)
            .unwrap_err();
        assert!(err.downcast_ref::<valgen_source::Error>().is_some());
    }

    #[test]
    fn test_directive_error_keeps_its_type() {
        let config = Config::default();
        let registry = RuleRegistry::default();
        let src = SRC.replace("length(min=1)", "length(min=one)");
        let err = Pipeline::new()
            .run("endpoint.go", src, &config, &registry)
            .unwrap_err();
        assert!(err.downcast_ref::<crate::Error>().is_some());
    }
}
