//! Brand collections and parallel fan-out across brands.

use locnorm_core::{BrandCollection, Error, RawRecord, Result};
use locnorm_reference::ReferenceDataStore;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::assembler::RecordAssembler;
use crate::geojson::read_feature_file;
use crate::types::*;

/// Build one brand's collection. Fails with [`Error::EmptyResult`] when no
/// record survives assembly.
pub fn build_collection(
    spec: &BrandSpec,
    records: &[RawRecord],
    refs: &ReferenceDataStore,
) -> Result<BrandCollection> {
    info!("Building brand '{}' from {} records", spec.key, records.len());
    let output = RecordAssembler::new(refs)
        .keep_display_names(spec.keep_display_names)
        .assemble(records);

    if output.locations.is_empty() {
        return Err(Error::EmptyResult {
            brand: spec.key.clone(),
        });
    }

    Ok(BrandCollection {
        key: spec.key.clone(),
        display_name: spec.display_name.clone(),
        category: spec.category.clone(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        stats: output.stats,
        locations: output.locations,
    })
}

/// Outcome of one brand job.
#[derive(Debug)]
pub struct BrandOutcome {
    pub key: String,
    pub result: Result<BrandCollection>,
}

fn run_job(job: &BrandJob, refs: &ReferenceDataStore) -> BrandOutcome {
    let result = read_feature_file(&job.path)
        .and_then(|records| build_collection(&job.spec, &records, refs));
    if let Err(e) = &result {
        warn!("Brand '{}' failed: {}", job.spec.key, e);
    }
    BrandOutcome {
        key: job.spec.key.clone(),
        result,
    }
}

/// Build every brand in parallel over the shared store. Outcomes come back
/// in job order. `workers == 0` uses rayon's global pool.
pub fn build_all(
    jobs: &[BrandJob],
    refs: &ReferenceDataStore,
    workers: usize,
) -> Result<Vec<BrandOutcome>> {
    if workers == 0 {
        return Ok(jobs.par_iter().map(|job| run_job(job, refs)).collect());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| Error::Config(format!("worker pool: {e}")))?;
    Ok(pool.install(|| jobs.par_iter().map(|job| run_job(job, refs)).collect()))
}
