// JSON seed import for catalog tables
use crate::lmdb_catalog::LmdbCatalog;
use catalogrec_core::{Error, ProductRow, Result, Tier};
use std::collections::BTreeMap;
use std::path::Path;

/// Parse a seed document `{ "<tier>": [ {name, description, category}, ... ] }`
pub fn parse_seed(json: &str) -> Result<Vec<(Tier, Vec<ProductRow>)>> {
    let raw: BTreeMap<String, Vec<ProductRow>> = serde_json::from_str(json)?;
    let mut tables: Vec<(Tier, Vec<ProductRow>)> = raw
        .into_iter()
        .map(|(name, rows)| -> Result<(Tier, Vec<ProductRow>)> { Ok((name.parse::<Tier>()?, rows)) })
        .collect::<Result<_>>()?;
    tables.sort_by_key(|(tier, _)| tier.index());
    Ok(tables)
}

/// Load a seed file and replace every tier it lists. Returns rows written.
pub fn import_seed_file<P: AsRef<Path>>(catalog: &LmdbCatalog, path: P) -> Result<usize> {
    let json = std::fs::read_to_string(path.as_ref())?;
    let mut written = 0;
    for (tier, rows) in parse_seed(&json)? {
        catalog
            .replace_tier(tier, &rows)
            .map_err(|e| Error::Storage(e.to_string()))?;
        tracing::info!(tier = %tier, rows = rows.len(), "seeded catalog table");
        written += rows.len();
    }
    Ok(written)
}
