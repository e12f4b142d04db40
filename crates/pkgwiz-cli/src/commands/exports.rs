//! Exports command implementation.
//!
//! Maps the artifacts in the output directory to `main`, `module`, `types`
//! and `exports`, and merges them into `package.json`. When no mapping can
//! be derived the manifest is left untouched and a warning is printed.

use std::path::Path;

use pkgwiz_entry::{synthesize, NativeFs};

use crate::cli::ExportsArgs;
use crate::commands::utils;
use crate::error::{EntryError, Result};
use crate::manifest::PackageManifest;
use crate::plan::export_source;
use crate::ui;

pub fn execute(args: ExportsArgs, cwd: Option<&Path>) -> Result<()> {
    let dir = utils::project_dir(cwd)?;
    let loaded = utils::load_config(&dir, args.config)?;
    let config = &loaded.config;
    let fs = NativeFs::new(&dir);

    let mut manifest = PackageManifest::read(&dir)?;
    let shape = utils::entry_shape(None, &loaded, &fs);
    let entry = utils::validate(&shape, &fs)?;

    let source = export_source(config, &entry);
    let layout = config.output_layout(manifest.is_esm());
    let patch = match synthesize(&source.split, &source.source_root, &layout, &fs) {
        Ok(patch) => patch,
        Err(err) => {
            ui::warning(&EntryError::from(err).to_string());
            return Ok(());
        }
    };

    manifest.apply(&patch, layout.out_dir());
    if args.dry_run {
        print!("{}", manifest.render()?);
        ui::info("Dry run: package.json was not modified");
    } else {
        manifest.write()?;
        ui::success(&format!(
            "Updated {} ({} export(s))",
            manifest.path.display(),
            patch.exports.len()
        ));
    }
    Ok(())
}
