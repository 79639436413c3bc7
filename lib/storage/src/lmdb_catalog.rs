// LMDB-backed catalog tables, one named database per tier
use crate::catalog::CatalogStore;
use anyhow::Result;
use catalogrec_core::{Error, ProductRow, Tier};
use heed::byteorder::BE;
use heed::types::{Bytes, U64};
use heed::{Database, Env, EnvOpenOptions};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

type TierDb = Database<U64<BE>, Bytes>;

pub struct LmdbCatalog {
    env: Arc<Env>,
    tables: HashMap<Tier, TierDb>,
}

impl LmdbCatalog {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        std::fs::create_dir_all(&path)?;

        let env = Arc::new(unsafe {
            EnvOpenOptions::new()
                .map_size(1024 * 1024 * 1024) // 1GB
                .max_dbs(Tier::ALL.len() as u32)
                .open(path)?
        });

        let mut wtxn = env.write_txn()?;
        let mut tables = HashMap::new();
        for tier in Tier::ALL {
            let db: TierDb = env.create_database(&mut wtxn, Some(db_name(tier).as_str()))?;
            tables.insert(tier, db);
        }
        wtxn.commit()?;

        Ok(Self { env, tables })
    }

    fn table(&self, tier: Tier) -> Result<&TierDb> {
        self.tables
            .get(&tier)
            .ok_or_else(|| anyhow::anyhow!("no database for tier {}", tier))
    }

    /// Replace the table for `tier` with `rows` in one transaction.
    /// Keys are row positions so iteration order is insertion order.
    pub fn replace_tier(&self, tier: Tier, rows: &[ProductRow]) -> Result<()> {
        let db = self.table(tier)?;
        let mut wtxn = self.env.write_txn()?;
        db.clear(&mut wtxn)?;
        for (position, row) in rows.iter().enumerate() {
            let data = bincode::serialize(row)?;
            db.put(&mut wtxn, &(position as u64), &data)?;
        }
        wtxn.commit()?;
        Ok(())
    }

    pub fn count(&self, tier: Tier) -> Result<u64> {
        let db = self.table(tier)?;
        let rtxn = self.env.read_txn()?;
        Ok(db.len(&rtxn)?)
    }

    pub fn load_tier(&self, tier: Tier) -> Result<Vec<ProductRow>> {
        let db = self.table(tier)?;
        let rtxn = self.env.read_txn()?;
        let mut rows = Vec::new();
        for result in db.iter(&rtxn)? {
            let (_, data) = result?;
            rows.push(bincode::deserialize(data)?);
        }
        Ok(rows)
    }
}

impl CatalogStore for LmdbCatalog {
    fn fetch_all(&self, tier: Tier) -> catalogrec_core::Result<Vec<ProductRow>> {
        self.load_tier(tier)
            .map_err(|e| Error::DataUnavailable(format!("{}: {}", tier, e)))
    }
}

fn db_name(tier: Tier) -> String {
    format!("tier_{}", tier.table_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_and_fetch_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = LmdbCatalog::open(dir.path()).unwrap();

        // more than 255 rows so big-endian key ordering matters
        let rows: Vec<ProductRow> = (0..300)
            .map(|i| ProductRow::new(format!("P{}", i), "", if i % 3 == 0 { None } else { Some("mouse") }))
            .collect();
        catalog.replace_tier(Tier::HighEnd, &rows).unwrap();

        assert_eq!(catalog.count(Tier::HighEnd).unwrap(), 300);
        assert_eq!(catalog.fetch_all(Tier::HighEnd).unwrap(), rows);
        assert!(catalog.fetch_all(Tier::Star).unwrap().is_empty());
    }

    #[test]
    fn test_replace_clears_previous_rows() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = LmdbCatalog::open(dir.path()).unwrap();

        let first = vec![
            ProductRow::new("A", "", Some("mouse")),
            ProductRow::new("B", "", Some("keyboard")),
        ];
        catalog.replace_tier(Tier::Star, &first).unwrap();
        catalog.replace_tier(Tier::Star, &first[1..]).unwrap();

        let rows = catalog.fetch_all(Tier::Star).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "B");
    }
}
