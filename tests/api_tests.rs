use std::sync::Arc;

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use recipe_api::{
    db::MemoryRecipeRepository,
    routes::{create_router, AppState},
    services::{CatalogService, RecommendationEngine},
};

fn create_test_server() -> TestServer {
    let state = AppState::new(
        CatalogService::new(Arc::new(MemoryRecipeRepository::new())),
        RecommendationEngine::fallback_only(),
    );
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

async fn create_recipe(server: &TestServer, title: &str, ingredients: &str) -> i64 {
    let response = server
        .post("/recipes")
        .json(&json!({
            "title": title,
            "ingredients": ingredients,
            "instructions": "Combine and cook",
            "difficulty": "easy"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    created["id"].as_i64().unwrap()
}

async fn rate(server: &TestServer, recipe_id: i64, rating: i64) {
    server
        .post(&format!("/recipes/{recipe_id}/rate"))
        .json(&json!({ "rating": rating }))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_root_and_request_id_header() {
    let server = create_test_server();
    let response = server.get("/").await;
    response.assert_status_ok();

    let request_id = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(request_id.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_cors_and_request_id_layers_apply_to_every_route() {
    let server = create_test_server();
    let response = server
        .get("/recipes")
        .add_header(header::ORIGIN, HeaderValue::from_static("http://example.com"))
        .await;
    response.assert_status_ok();

    assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
    let request_id = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(request_id.to_str().unwrap()).is_ok());

    let missing = server
        .get("/recipes/12345")
        .add_header(header::ORIGIN, HeaderValue::from_static("http://example.com"))
        .await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(missing.header(header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
}

#[tokio::test]
async fn test_create_and_get_recipe() {
    let server = create_test_server();

    let response = server
        .post("/recipes")
        .json(&json!({
            "title": "Pancakes",
            "description": "Fluffy",
            "ingredients": "egg, milk, flour",
            "instructions": "Whisk and fry",
            "prep_time": 10,
            "servings": 4,
            "difficulty": "easy",
            "dietary_restrictions": "vegetarian"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["title"], "Pancakes");
    assert_eq!(created["average_rating"], 0.0);
    assert!(created["created_at"].is_string());

    let id = created["id"].as_i64().unwrap();
    let response = server.get(&format!("/recipes/{id}")).await;
    response.assert_status_ok();
    let fetched: Value = response.json();
    assert_eq!(fetched["id"], id);
    assert_eq!(fetched["servings"], 4);
    assert_eq!(fetched["dietary_restrictions"], "vegetarian");
}

#[tokio::test]
async fn test_get_missing_recipe_is_404() {
    let server = create_test_server();
    let response = server.get("/recipes/999").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn test_search_uses_substring_and_conjunction() {
    let server = create_test_server();
    create_recipe(&server, "Moussaka", "eggplant, milk, flour").await;
    create_recipe(&server, "Omelette", "egg, butter").await;
    create_recipe(&server, "Porridge", "oats, milk").await;

    let response = server
        .get("/recipes")
        .add_query_param("ingredients", "Egg, milk")
        .await;
    response.assert_status_ok();
    let recipes: Vec<Value> = response.json();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0]["title"], "Moussaka");

    let response = server.get("/recipes").await;
    let all: Vec<Value> = response.json();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_search_by_difficulty_is_exact() {
    let server = create_test_server();
    create_recipe(&server, "Toast", "bread").await;

    let response = server
        .get("/recipes")
        .add_query_param("difficulty", "hard")
        .await;
    let recipes: Vec<Value> = response.json();
    assert!(recipes.is_empty());
}

#[tokio::test]
async fn test_rating_updates_average() {
    let server = create_test_server();
    let id = create_recipe(&server, "Pancakes", "egg, milk").await;

    let response = server
        .post(&format!("/recipes/{id}/rate"))
        .json(&json!({ "rating": 5, "comment": "Great" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let rating: Value = response.json();
    assert_eq!(rating["user_name"], "Anonymous");
    assert_eq!(rating["comment"], "Great");
    assert_eq!(rating["recipe_id"], id);

    rate(&server, id, 4).await;

    let recipe: Value = server.get(&format!("/recipes/{id}")).await.json();
    assert_eq!(recipe["average_rating"], 4.5);
}

#[tokio::test]
async fn test_rating_validation() {
    let server = create_test_server();
    let id = create_recipe(&server, "Pancakes", "egg").await;

    server
        .post(&format!("/recipes/{id}/rate"))
        .json(&json!({ "rating": 6 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .post("/recipes/404/rate")
        .json(&json!({ "rating": 3 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_popular_recipes() {
    let server = create_test_server();
    let soup = create_recipe(&server, "Soup", "broth").await;
    let salad = create_recipe(&server, "Salad", "lettuce").await;
    let stew = create_recipe(&server, "Stew", "beef").await;

    rate(&server, soup, 3).await;
    rate(&server, soup, 3).await;
    rate(&server, salad, 5).await;
    rate(&server, salad, 4).await;
    rate(&server, stew, 5).await;

    let response = server
        .get("/recipes/popular")
        .add_query_param("limit", 5)
        .await;
    response.assert_status_ok();
    let popular: Vec<Value> = response.json();
    let titles: Vec<&str> = popular.iter().map(|r| r["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Salad", "Soup"]);
    assert_eq!(popular[0]["average_rating"], 4.5);

    server
        .get("/recipes/popular")
        .add_query_param("limit", 51)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommendations_without_credentials() {
    let server = create_test_server();

    let response = server
        .get("/recommendations")
        .add_query_param("ingredients", "chicken")
        .add_query_param("skill_level", "expert")
        .await;
    response.assert_status_ok();

    let recommendations: Vec<Value> = response.json();
    assert_eq!(recommendations.len(), 2);
    assert_eq!(recommendations[0]["title"], "Simple Chicken Stir-fry");
    assert_eq!(recommendations[1]["title"], "Mixed Ingredient Soup");
    assert_eq!(recommendations[0]["prep_time"], 15);
    assert_eq!(recommendations[1]["prep_time"], 30);
}

#[tokio::test]
async fn test_recommendations_require_ingredients() {
    let server = create_test_server();

    server
        .get("/recommendations")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .get("/recommendations")
        .add_query_param("ingredients", " ")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
