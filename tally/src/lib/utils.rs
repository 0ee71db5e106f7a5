pub use std::{
    fs::{self, File},
    io::{BufRead, BufWriter, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
};
pub use anyhow::{anyhow, Context, Result};
pub use itertools::Itertools;
pub use log::{debug, info, warn};

/// Column width of every console table.
pub const CELL: usize = 12;

/// `<stem>_<family>_results.<ext>` inside `dir`, e.g.
/// `output/first_fit_memory_results.csv`.
pub fn artifact(dir: &Path, stem: &str, family: &str, ext: &str) -> PathBuf {
    dir.join(format!("{stem}_{family}_results.{ext}"))
}

/// Creates `dir` (and parents) if missing.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("cannot create directory {}", dir.display()))
}

/// Opens `path` for buffered writing, truncating it.
pub fn create(path: &Path) -> Result<BufWriter<File>> {
    let fd = File::create(path)
        .with_context(|| format!("cannot create {}", path.display()))?;

    Ok(BufWriter::new(fd))
}
