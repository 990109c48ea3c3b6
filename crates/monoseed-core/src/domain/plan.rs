//! The fixed generator step plan.
//!
//! Order matters: each step depends on the filesystem state the previous one
//! left behind, so the plan is built once and never reordered.

use crate::domain::{
    entities::{
        project::ProjectSpec,
        step::{Step, StepId},
    },
    value_objects::OutputMode,
};

/// Steps 1 through 5: workspace, both plugins, both applications.
///
/// The workspace generator runs in the parent directory and creates the
/// target itself; every later step runs inside the target.
pub fn generator_steps(spec: &ProjectSpec) -> Vec<Step> {
    let opts = spec.options();
    let versions = spec.versions();
    let timeouts = spec.timeouts();
    let pm = opts.package_manager;
    let target = spec.target_path();

    let workspace = Step::new(StepId::WorkspaceInit, "npx", spec.parent_dir())
        .args([
            "--yes".to_string(),
            format!("create-nx-workspace@{}", versions.nx),
            spec.name().to_string(),
            "--preset=apps".into(),
            format!("--packageManager={pm}"),
            "--nxCloud=skip".into(),
            "--interactive=false".into(),
            "--skipGit=false".into(),
        ])
        .timeout(timeouts.workspace)
        .mode(OutputMode::Inherit);

    let nx = |id: StepId| {
        let (program, prefix) = pm.exec_prefix();
        Step::new(id, program, target)
            .args(prefix.iter().copied())
            .arg("nx")
            .mode(OutputMode::Inherit)
    };

    let server_tests = if opts.add_test_config { "jest" } else { "none" };
    let client_tests = if opts.add_test_config {
        opts.bundler.test_runner()
    } else {
        "none"
    };

    vec![
        workspace,
        nx(StepId::PluginNest)
            .args(["add".to_string(), format!("@nx/nest@{}", versions.nest_plugin)])
            .timeout(timeouts.plugin),
        nx(StepId::PluginReact)
            .args(["add".to_string(), format!("@nx/react@{}", versions.react_plugin)])
            .timeout(timeouts.plugin),
        nx(StepId::AppServer)
            .args([
                "g".to_string(),
                "@nx/nest:application".into(),
                "--directory=server".into(),
                "--name=server".into(),
                "--linter=eslint".into(),
                format!("--unitTestRunner={server_tests}"),
                "--e2eTestRunner=none".into(),
                "--no-interactive".into(),
            ])
            .timeout(timeouts.generator),
        nx(StepId::AppClient)
            .args([
                "g".to_string(),
                "@nx/react:application".into(),
                "--directory=client".into(),
                "--name=client".into(),
                format!("--bundler={}", opts.bundler),
                "--style=css".into(),
                "--routing=false".into(),
                "--linter=eslint".into(),
                format!("--unitTestRunner={client_tests}"),
                "--e2eTestRunner=none".into(),
                "--no-interactive".into(),
            ])
            .timeout(timeouts.generator),
    ]
}

/// The optional dependency install, run inside the finished project.
pub fn install_step(spec: &ProjectSpec) -> Step {
    let pm = spec.options().package_manager;
    Step::new(StepId::Install, pm.program(), spec.target_path())
        .args(pm.install_args())
        .timeout(spec.timeouts().install)
        .mode(OutputMode::Capture)
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::Duration;

    use super::*;
    use crate::domain::{
        entities::project::ConfigOptions,
        value_objects::{Bundler, PackageManager, ProjectName, Strategy},
    };

    fn spec(options: ConfigOptions) -> ProjectSpec {
        ProjectSpec::new(
            ProjectName::parse("demo-app").unwrap(),
            "/work",
            Strategy::GeneratorPipeline,
            options,
        )
        .unwrap()
    }

    #[test]
    fn plan_has_fixed_order() {
        let ids: Vec<StepId> = generator_steps(&spec(ConfigOptions::default()))
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(
            ids,
            [
                StepId::WorkspaceInit,
                StepId::PluginNest,
                StepId::PluginReact,
                StepId::AppServer,
                StepId::AppClient,
            ]
        );
    }

    #[test]
    fn workspace_runs_in_parent_and_others_in_target() {
        let steps = generator_steps(&spec(ConfigOptions::default()));
        assert_eq!(steps[0].cwd, Path::new("/work"));
        assert!(steps[1..].iter().all(|s| s.cwd == Path::new("/work/demo-app")));
    }

    #[test]
    fn workspace_command_line_for_npm() {
        let steps = generator_steps(&spec(ConfigOptions::default()));
        assert_eq!(
            steps[0].command_line(),
            "npx --yes create-nx-workspace@latest demo-app --preset=apps \
             --packageManager=npm --nxCloud=skip --interactive=false --skipGit=false"
        );
        assert_eq!(steps[0].timeout, Duration::from_secs(600));
        assert_eq!(steps[1].command_line(), "npx nx add @nx/nest@latest");
    }

    #[test]
    fn pnpm_uses_exec_prefix() {
        let steps = generator_steps(&spec(ConfigOptions {
            package_manager: PackageManager::Pnpm,
            ..ConfigOptions::default()
        }));
        assert_eq!(steps[2].command_line(), "pnpm exec nx add @nx/react@latest");
    }

    #[test]
    fn client_flags_follow_bundler_and_tests() {
        let steps = generator_steps(&spec(ConfigOptions {
            bundler: Bundler::Webpack,
            add_test_config: false,
            ..ConfigOptions::default()
        }));
        let client = steps[4].command_line();
        assert!(client.contains("--bundler=webpack"));
        assert!(client.contains("--unitTestRunner=none"));
        assert!(steps[3].command_line().contains("--unitTestRunner=none"));

        let vite = generator_steps(&spec(ConfigOptions::default()));
        assert!(vite[4].command_line().contains("--unitTestRunner=vitest"));
        assert!(vite[3].command_line().contains("--unitTestRunner=jest"));
    }

    #[test]
    fn install_step_captures_output() {
        let step = install_step(&spec(ConfigOptions {
            package_manager: PackageManager::Yarn,
            ..ConfigOptions::default()
        }));
        assert_eq!(step.command_line(), "yarn install");
        assert_eq!(step.mode, OutputMode::Capture);
        assert_eq!(step.cwd, Path::new("/work/demo-app"));
        assert_eq!(step.timeout, Duration::from_secs(300));
    }
}
