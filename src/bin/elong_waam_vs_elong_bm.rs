use std::path::Path;

use anyhow::Result;
use waam_extractor::{charts, constants, logging, pipeline};

fn main() -> Result<()> {
    logging::init_logging();
    pipeline::run_chart(
        &charts::ELONG_WAAM_VS_ELONG_BM,
        Path::new(constants::DERIVED_STORE),
        Path::new("."),
    )
}
