// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod support;

use actix_web::{
    App,
    http::{StatusCode, header},
    middleware::NormalizePath,
    test,
};
use serde_json::{Value, json};
use server_actix::configure_router;
use server_common::Service;

use support::system_router;

async fn graphql(query: &str) -> Value {
    let app = test::init_service(
        App::new().configure(configure_router(system_router(Service::Countries, &[]))),
    )
    .await;

    let request = test::TestRequest::post()
        .uri("/graphql")
        .set_json(json!({ "query": query }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    test::read_body_json(response).await
}

#[actix_web::test]
async fn country_lookup_is_case_insensitive() {
    let body = graphql(
        r#"{
          country(name: "gErMaNy") {
            __typename
            ... on Country { name capital }
            ... on Error { status message }
          }
        }"#,
    )
    .await;

    assert_eq!(
        body,
        json!({
            "data": {
                "country": { "__typename": "Country", "name": "Germany", "capital": "Berlin" }
            }
        })
    );
}

#[actix_web::test]
async fn unknown_country_is_an_error_value() {
    let body = graphql(
        r#"{
          country(name: "Atlantis") {
            __typename
            ... on Country { name }
            ... on Error { status message }
          }
        }"#,
    )
    .await;

    assert_eq!(
        body,
        json!({
            "data": {
                "country": {
                    "__typename": "Error",
                    "status": 404,
                    "message": "Country Atlantis not found"
                }
            }
        })
    );
}

#[actix_web::test]
async fn countries_are_paginated() {
    let body = graphql("{ countries(first: 2, offset: 1) { name } }").await;

    assert_eq!(
        body,
        json!({ "data": { "countries": [{ "name": "Argentina" }, { "name": "Australia" }] } })
    );
}

#[actix_web::test]
async fn null_offset_reads_as_the_first_page() {
    let first_page = json!({
        "data": { "countries": [{ "name": "Afghanistan" }, { "name": "Argentina" }] }
    });

    assert_eq!(
        graphql("{ countries(first: 2, offset: null) { name } }").await,
        first_page
    );

    let app = test::init_service(
        App::new().configure(configure_router(system_router(Service::Countries, &[]))),
    )
    .await;
    let request = test::TestRequest::post()
        .uri("/graphql")
        .set_json(json!({
            "query": "query($offset: Int) { countries(first: 2, offset: $offset) { name } }",
            "variables": { "offset": null }
        }))
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(body, first_page);
}

#[actix_web::test]
async fn created_country_can_be_looked_up() {
    let app = test::init_service(
        App::new().configure(configure_router(system_router(Service::Countries, &[]))),
    )
    .await;

    let post = |query: &str| {
        test::TestRequest::post()
            .uri("/graphql")
            .set_json(json!({ "query": query }))
            .to_request()
    };

    let created: Value = test::call_and_read_body_json(
        &app,
        post(
            r#"mutation {
              createCountry(country: { name: "Atlantis", capital: "Poseidonis" }) { id name capital }
            }"#,
        ),
    )
    .await;
    assert_eq!(
        created,
        json!({
            "data": {
                "createCountry": { "id": 4732832, "name": "Atlantis", "capital": "Poseidonis" }
            }
        })
    );

    let found: Value = test::call_and_read_body_json(
        &app,
        post(r#"{ country(name: "atlantis") { ... on Country { id capital } } }"#),
    )
    .await;
    assert_eq!(
        found,
        json!({ "data": { "country": { "id": 4732832, "capital": "Poseidonis" } } })
    );

    let listing: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/countries?first=1&offset=14")
            .to_request(),
    )
    .await;
    assert_eq!(listing[0]["name"], "Atlantis");
}

#[actix_web::test]
async fn validation_errors_are_reported_with_locations() {
    let body = graphql("{\n  country(name: \"Peru\") { ... on Country { anthem } }\n}").await;

    assert!(body.get("data").is_none());
    assert_eq!(body["errors"][0]["locations"][0]["line"], 2);
    assert!(
        body["errors"][0]["message"]
            .as_str()
            .is_some_and(|message| message.contains("anthem"))
    );
}

#[actix_web::test]
async fn malformed_body_is_a_bad_request() {
    let app = test::init_service(
        App::new().configure(configure_router(system_router(Service::Countries, &[]))),
    )
    .await;

    let request = test::TestRequest::post()
        .uri("/graphql")
        .insert_header(header::ContentType::json())
        .set_payload("{ not json")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn rest_listing() {
    let app = test::init_service(
        App::new()
            .wrap(NormalizePath::trim())
            .configure(configure_router(system_router(Service::Countries, &[]))),
    )
    .await;

    for uri in ["/countries?first=2", "/countries/?first=2&offset=0"] {
        let response =
            test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");

        let body: Value = test::read_body_json(response).await;
        let names: Vec<_> = body
            .as_array()
            .into_iter()
            .flatten()
            .map(|country| country["name"].clone())
            .collect();
        assert_eq!(names, vec![json!("Afghanistan"), json!("Argentina")], "{uri}");
    }

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/countries?first=-1")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn playground_and_unknown_paths() {
    let app = test::init_service(
        App::new().configure(configure_router(system_router(Service::Countries, &[]))),
    )
    .await;

    let root = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(root.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        root.headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/playground")
    );

    let playground =
        test::call_service(&app, test::TestRequest::get().uri("/playground").to_request()).await;
    assert_eq!(playground.status(), StatusCode::OK);
    let html = test::read_body(playground).await;
    assert!(String::from_utf8_lossy(&html).contains("Countries"));

    let unknown =
        test::call_service(&app, test::TestRequest::get().uri("/nowhere").to_request()).await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn playground_respects_introspection_setting() {
    let app = test::init_service(App::new().configure(configure_router(system_router(
        Service::Countries,
        &[("ALMANAC_INTROSPECTION", "false")],
    ))))
    .await;

    let playground =
        test::call_service(&app, test::TestRequest::get().uri("/playground").to_request()).await;
    assert_eq!(playground.status(), StatusCode::OK);
    assert_eq!(
        test::read_body(playground).await,
        "Introspection is disabled"
    );
}
