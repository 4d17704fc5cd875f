//! WebAssembly bindings for the browser front end.
//!
//! The page drives a [`WasmGeneticAlgorithm`] one generation at a time and
//! reads back either the flat `u32` layout of
//! [`GenerationResult::flatten`](crate::ga::GenerationResult::flatten) or
//! the full generation as a JS object.

use crate::blotto::ScoringMode;
use crate::ga::{BlottoConfig, GeneticAlgorithm};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmGeneticAlgorithm {
    inner: GeneticAlgorithm,
}

#[wasm_bindgen]
impl WasmGeneticAlgorithm {
    /// `scoring` is 0 for wins, 1 for points.
    #[wasm_bindgen(constructor)]
    pub fn new(
        num_individuals: u32,
        castle_points: Vec<u32>,
        num_soldiers: u32,
        scoring: u8,
    ) -> Result<WasmGeneticAlgorithm, JsError> {
        let scoring = ScoringMode::try_from(scoring)?;
        // No thread pool inside a plain wasm module.
        let config = BlottoConfig::new(
            castle_points,
            num_soldiers,
            num_individuals as usize,
            scoring,
        )
        .with_parallel(false);
        Ok(Self {
            inner: GeneticAlgorithm::new(config)?,
        })
    }

    /// Runs the next generation, returning details about the individuals
    /// and their scores, best first.
    ///
    /// The format is `[individual 1 castle 1 soldiers, i1c2, ..., i1 score, i2c1, ...]`.
    pub fn run_generation(&mut self) -> Result<Vec<u32>, JsError> {
        Ok(self.inner.step()?.flatten())
    }

    /// Discards the current run.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Index of the live generation, or `undefined` before the first run.
    pub fn generation(&self) -> Option<u32> {
        self.inner
            .current()
            .map(|r| u32::try_from(r.generation()).unwrap_or(u32::MAX))
    }

    /// The live generation as a JS object, or `null`.
    pub fn current_result(&self) -> Result<JsValue, JsError> {
        match self.inner.current() {
            Some(result) => serde_wasm_bindgen::to_value(result)
                .map_err(|e| JsError::new(&e.to_string())),
            None => Ok(JsValue::NULL),
        }
    }
}
