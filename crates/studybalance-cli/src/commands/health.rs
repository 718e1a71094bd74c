use studybalance_core::api;

use super::common::print_json;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    print_json(&api::health())
}
