//! Plan command implementation.

use std::path::Path;

use pkgwiz_entry::NativeFs;

use crate::backup::backup_and_clean;
use crate::cli::PlanArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::plan::{plan_build, BuildPlan};
use crate::ui;

/// Validate the configured entry, prepare the output directory and print
/// the build steps.
///
/// With `--json` the plan is the only thing written to stdout.
pub fn execute(args: PlanArgs, cwd: Option<&Path>) -> Result<()> {
    let dir = utils::project_dir(cwd)?;
    let loaded = utils::load_config(&dir, args.config)?;
    let config = &loaded.config;
    let fs = NativeFs::new(&dir);

    if !args.json {
        ui::info("Build configuration:");
        eprintln!("{config}");
    }

    let shape = utils::entry_shape(None, &loaded, &fs);
    let entry = utils::validate(&shape, &fs)?;

    if config.clean {
        let out_dir = utils::resolve_path(Path::new(&config.out_dir), &dir);
        backup_and_clean(&out_dir, &dir, args.force)?;
    }

    let plan = plan_build(config, &entry, &dir)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", describe(&plan));
    }

    if plan.manifest.is_some() && config.auto_export {
        ui::info("Run `pkgwiz exports` after bundling to update package.json");
    }
    ui::success(&format!("Planned {} build step(s)", plan.steps.len()));
    Ok(())
}

fn describe(plan: &BuildPlan) -> String {
    let mut out = String::new();
    if let Some(barrel) = &plan.barrel {
        out.push_str(&format!("barrel: {barrel}\n"));
    }
    for (index, step) in plan.steps.iter().enumerate() {
        let formats: Vec<&str> = step.formats.iter().map(|f| f.as_str()).collect();
        out.push_str(&format!(
            "{}. {} [{}] {} -> {}{}\n",
            index + 1,
            step.entry,
            formats.join(", "),
            step.platform,
            step.out_dir,
            if step.minify { " (minified)" } else { "" }
        ));
    }
    out
}
