use actix_web::{web, App, HttpServer, HttpResponse, Result as ActixResult};
use actix_cors::Cors;
use catalogrec_core::{Error, Tier, DEFAULT_RECOMMENDATIONS};
use catalogrec_storage::RecommenderService;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
struct SelectTierRequest {
    value: usize,
}

#[derive(Deserialize)]
struct RecommendRequest {
    category: String,
    limit: Option<usize>,
}

#[derive(Deserialize)]
struct SimilarQuery {
    limit: Option<usize>,
}

#[derive(Serialize)]
struct TiersResponse {
    tiers: Vec<Tier>,
    current: Tier,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(
        service: Arc<RecommenderService>,
        port: u16,
    ) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(service.clone()))
                .configure(Self::routes)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }

    pub fn routes(cfg: &mut web::ServiceConfig) {
        cfg.route("/health", web::get().to(health))
            .route("/tiers", web::get().to(list_tiers))
            .route("/tier", web::post().to(select_tier))
            .route("/categories", web::get().to(list_categories))
            .route("/recommend", web::post().to(recommend))
            .route("/products/{position}/similar", web::get().to(similar_products));
    }
}

fn error_response(e: &Error) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        Error::InvalidTier { .. } | Error::UnknownTier(_) => HttpResponse::BadRequest().json(body),
        Error::ProductNotFound(_) => HttpResponse::NotFound().json(body),
        Error::DataUnavailable(_) | Error::Storage(_) => HttpResponse::ServiceUnavailable().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

async fn health(
    service: web::Data<Arc<RecommenderService>>,
) -> ActixResult<HttpResponse> {
    let state = service.state();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "tier": state.tier(),
        "products": state.len(),
    })))
}

async fn list_tiers(
    service: web::Data<Arc<RecommenderService>>,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(TiersResponse {
        tiers: Tier::ALL.to_vec(),
        current: service.current_tier(),
    }))
}

async fn select_tier(
    service: web::Data<Arc<RecommenderService>>,
    req: web::Json<SelectTierRequest>,
) -> ActixResult<HttpResponse> {
    let index = req.value;
    let service = service.get_ref().clone();
    // rebuild is CPU bound; keep it off the worker thread
    let result = web::block(move || service.select(index)).await?;

    match result {
        Ok(tier) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "status": "success",
            "message": "Table selection updated successfully.",
            "tier": tier,
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn list_categories(
    service: web::Data<Arc<RecommenderService>>,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.list_categories()))
}

async fn recommend(
    service: web::Data<Arc<RecommenderService>>,
    req: web::Json<RecommendRequest>,
) -> ActixResult<HttpResponse> {
    let state = service.state();
    let limit = req.limit.unwrap_or(DEFAULT_RECOMMENDATIONS);
    let products = state.recommend(&req.category, limit);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "category": req.category,
        "tier": state.tier(),
        "products": products,
    })))
}

async fn similar_products(
    service: web::Data<Arc<RecommenderService>>,
    path: web::Path<usize>,
    query: web::Query<SimilarQuery>,
) -> ActixResult<HttpResponse> {
    let position = path.into_inner();
    let limit = query.limit.unwrap_or(DEFAULT_RECOMMENDATIONS);

    match service.similar_products(position, limit) {
        Ok(products) => Ok(HttpResponse::Ok().json(products)),
        Err(e) => Ok(error_response(&e)),
    }
}
