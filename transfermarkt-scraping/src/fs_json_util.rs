use std::{
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context;
use fs_err::File;
use serde::Serialize;

pub fn write_json<P: Into<PathBuf>, T: Serialize>(path: P, value: &T) -> anyhow::Result<()> {
    let path = path.into();
    write_json_impl(&path, value)
        .with_context(|| format!("While trying to write {path:?}"))
}

fn write_json_impl<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    Ok(serde_json::to_writer(
        BufWriter::new(File::create(path)?),
        value,
    )?)
}
