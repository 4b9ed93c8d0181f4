use crate::model::Catalog;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge un catalogue depuis un support.
    fn load(&self) -> anyhow::Result<Catalog>;
    /// Sauvegarde de manière atomique.
    fn save(&self, catalog: &Catalog) -> anyhow::Result<()>;
    /// Catalogue vide si le support n'existe pas encore. Toute autre
    /// erreur, contenu corrompu compris, est propagée : on n'écrase pas
    /// un catalogue illisible par un catalogue neuf.
    fn load_or_default(&self) -> anyhow::Result<Catalog> {
        match self.load() {
            Ok(catalog) => Ok(catalog),
            Err(err) => {
                let missing = err
                    .downcast_ref::<std::io::Error>()
                    .map(|io| io.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false);
                if missing {
                    Ok(Catalog::default())
                } else {
                    Err(err)
                }
            }
        }
    }
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Catalog> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let catalog: Catalog = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(catalog)
    }

    fn save(&self, catalog: &Catalog) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(catalog)?;
        let mut tmp = NamedTempFile::new_in(self.path.parent().unwrap_or_else(|| Path::new(".")))
            .with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}
