//! REST API for wordsim.
//!
//! Every configured dataset is loaded once at startup and shared read-only
//! between workers. Requests may name a dataset; otherwise the default one is
//! used.
//!
//! ## Endpoints
//!
//! - `POST /api/search` - Top 10 most similar words to `word`
//! - `POST /api/explain` - Step-by-step cosine similarity of two words
//! - `GET /api/suggest?prefix=..` - Words starting with a prefix
//! - `GET /api/words` - Every word of a dataset
//! - `GET /api/health` - Loaded datasets and their sizes
//!
//! ## Usage
//!
//! ```rust,no_run
//! use actix_web::{web, App, HttpServer};
//! use wordsim::{server::AppState, Settings};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let state = web::Data::new(AppState::load(&Settings::default()).unwrap());
//!     HttpServer::new(move || App::new().app_data(state.clone()).configure(wordsim::server::config))
//!         .bind("0.0.0.0:7878")?
//!         .run()
//!         .await
//! }
//! ```

use crate::breakdown::CalculationBreakdown;
use crate::catalog::Catalog;
use crate::config::Settings;
use crate::engine::{ExplainOutcome, SearchOutcome, SearchResult, SimilarityEngine, TOP_K};
use crate::error::CatalogError;
use crate::store::{fold, VectorStore};
use crate::suggest::{suggest, MAX_SUGGESTIONS};
use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Datasets and limits shared by all handlers.
pub struct AppState {
    default_dataset: String,
    stores: Vec<Arc<VectorStore>>,
    top_k: usize,
    max_suggestions: usize,
}

impl AppState {
    /// Loads every dataset listed in the settings.
    pub fn load(settings: &Settings) -> Result<Self, CatalogError> {
        let catalog = Catalog::new(settings.datasets.clone());
        let stores = catalog
            .names()
            .map(|name| catalog.load(name))
            .collect::<Result<Vec<_>, _>>()?;

        if catalog.get(&settings.default_dataset).is_none() {
            return Err(CatalogError::UnknownDataset(settings.default_dataset.clone()));
        }

        info!(
            datasets = stores.len(),
            default = %settings.default_dataset,
            "datasets ready"
        );

        Ok(AppState::new(stores, &settings.default_dataset)
            .with_limits(settings.top_k, settings.max_suggestions))
    }

    pub fn new(stores: Vec<Arc<VectorStore>>, default_dataset: &str) -> Self {
        AppState {
            default_dataset: default_dataset.to_string(),
            stores,
            top_k: TOP_K,
            max_suggestions: MAX_SUGGESTIONS,
        }
    }

    pub fn with_limits(mut self, top_k: usize, max_suggestions: usize) -> Self {
        self.top_k = top_k;
        self.max_suggestions = max_suggestions;
        self
    }

    fn store(&self, dataset: Option<&str>) -> Result<&VectorStore, HttpResponse> {
        let name = dataset.unwrap_or(&self.default_dataset);
        self.stores
            .iter()
            .find(|s| s.name() == name)
            .map(|s| s.as_ref())
            .ok_or_else(|| error_response(HttpResponse::NotFound(), format!("Unknown dataset: {}", name)))
    }
}

// --- Request structs ---

#[derive(Deserialize)]
struct SearchRequest {
    #[serde(default)]
    word: String,
    dataset: Option<String>,
}

#[derive(Deserialize)]
struct ExplainRequest {
    word: String,
    candidate: String,
    dataset: Option<String>,
}

#[derive(Deserialize)]
struct SuggestQuery {
    #[serde(default)]
    prefix: String,
    dataset: Option<String>,
}

#[derive(Deserialize)]
struct DatasetQuery {
    dataset: Option<String>,
}

// --- Response structs ---

#[derive(Serialize)]
struct SearchResponse<'a> {
    input_word: String,
    dataset: &'a str,
    results: Vec<SearchResult>,
}

#[derive(Serialize)]
struct ExplainResponse<'a> {
    dataset: &'a str,
    #[serde(flatten)]
    breakdown: CalculationBreakdown,
}

#[derive(Serialize)]
struct SuggestResponse<'a> {
    suggestions: Vec<&'a str>,
}

#[derive(Serialize)]
struct WordsResponse<'a> {
    dataset: &'a str,
    words: &'a [String],
}

#[derive(Serialize)]
struct HealthResponse<'a> {
    status: &'static str,
    datasets: Vec<DatasetHealth<'a>>,
}

#[derive(Serialize)]
struct DatasetHealth<'a> {
    name: &'a str,
    vocabulary_size: usize,
    dimensionality: usize,
}

fn error_response(mut builder: actix_web::HttpResponseBuilder, message: String) -> HttpResponse {
    builder.json(serde_json::json!({ "error": message }))
}

// --- Handlers ---

async fn search_handler(state: web::Data<AppState>, body: web::Json<SearchRequest>) -> impl Responder {
    let store = match state.store(body.dataset.as_deref()) {
        Ok(store) => store,
        Err(response) => return response,
    };

    let engine = SimilarityEngine::new(store).with_top_k(state.top_k);
    match engine.search(&body.word) {
        SearchOutcome::Empty => {
            error_response(HttpResponse::BadRequest(), "Word is required".to_string())
        }
        SearchOutcome::NotFound(word) => {
            debug!(word = %word, dataset = store.name(), "search miss");
            error_response(
                HttpResponse::NotFound(),
                format!("Word \"{}\" not found in vocabulary", word),
            )
        }
        SearchOutcome::Found(results) => HttpResponse::Ok().json(SearchResponse {
            input_word: fold(&body.word),
            dataset: store.name(),
            results,
        }),
    }
}

async fn explain_handler(state: web::Data<AppState>, body: web::Json<ExplainRequest>) -> impl Responder {
    let store = match state.store(body.dataset.as_deref()) {
        Ok(store) => store,
        Err(response) => return response,
    };

    match SimilarityEngine::new(store).explain(&body.word, &body.candidate) {
        ExplainOutcome::Found(breakdown) => HttpResponse::Ok().json(ExplainResponse {
            dataset: store.name(),
            breakdown,
        }),
        ExplainOutcome::NotFound(word) => error_response(
            HttpResponse::NotFound(),
            format!("Word \"{}\" not found in vocabulary", word),
        ),
    }
}

async fn suggest_handler(state: web::Data<AppState>, query: web::Query<SuggestQuery>) -> impl Responder {
    let store = match state.store(query.dataset.as_deref()) {
        Ok(store) => store,
        Err(response) => return response,
    };

    HttpResponse::Ok().json(SuggestResponse {
        suggestions: suggest(&query.prefix, store.words(), state.max_suggestions),
    })
}

async fn words_handler(state: web::Data<AppState>, query: web::Query<DatasetQuery>) -> impl Responder {
    let store = match state.store(query.dataset.as_deref()) {
        Ok(store) => store,
        Err(response) => return response,
    };

    HttpResponse::Ok().json(WordsResponse {
        dataset: store.name(),
        words: store.words(),
    })
}

async fn health_handler(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        datasets: state
            .stores
            .iter()
            .map(|s| DatasetHealth {
                name: s.name(),
                vocabulary_size: s.size(),
                dimensionality: s.dimensionality(),
            })
            .collect(),
    })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/search").route(web::post().to(search_handler)))
       .service(web::resource("/api/explain").route(web::post().to(explain_handler)))
       .service(web::resource("/api/suggest").route(web::get().to(suggest_handler)))
       .service(web::resource("/api/words").route(web::get().to(words_handler)))
       .service(web::resource("/api/health").route(web::get().to(health_handler)));
}
