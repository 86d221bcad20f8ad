// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod support;

use actix_web::{App, http::StatusCode, test};
use serde_json::{Value, json};
use server_actix::configure_router;
use server_common::Service;

use support::system_router;

async fn graphql(query: &str) -> Value {
    let app = test::init_service(
        App::new().configure(configure_router(system_router(Service::Champions, &[]))),
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
async fn champion_by_name() {
    let body = graphql(
        r#"{
          getChampionByName(name: "ahri") {
            __typename
            ... on Champion { name title tags stats { hp } }
            ... on NotFoundError { message }
          }
        }"#,
    )
    .await;

    assert_eq!(
        body,
        json!({
            "data": {
                "getChampionByName": {
                    "__typename": "Champion",
                    "name": "Ahri",
                    "title": "the Nine-Tailed Fox",
                    "tags": ["Mage", "Assassin"],
                    "stats": { "hp": 570.0 }
                }
            }
        })
    );
}

#[actix_web::test]
async fn champions_by_tag() {
    let body = graphql(
        r#"{
          getChampionsByTag(tag: "Tank") {
            ... on Champions { items { name } }
            ... on NotFoundError { message }
          }
        }"#,
    )
    .await;

    assert_eq!(
        body,
        json!({
            "data": {
                "getChampionsByTag": {
                    "items": [{ "name": "Aatrox" }, { "name": "Alistar" }, { "name": "Braum" }]
                }
            }
        })
    );
}

#[actix_web::test]
async fn champions_by_stat_threshold() {
    let body = graphql(
        r#"{
          getChampionsByStatGte(name: "hp", value: 650) {
            ... on Champions { items { name stats { hp } } }
            ... on NotFoundError { message }
          }
        }"#,
    )
    .await;

    assert_eq!(
        body,
        json!({
            "data": {
                "getChampionsByStatGte": {
                    "items": [
                        { "name": "Aatrox", "stats": { "hp": 650.0 } },
                        { "name": "Alistar", "stats": { "hp": 685.0 } },
                        { "name": "Zed", "stats": { "hp": 654.0 } }
                    ]
                }
            }
        })
    );
}

#[actix_web::test]
async fn empty_results_are_not_found_errors() {
    let body = graphql(
        r#"{
          byName: getChampionByName(name: "Teemo") { ... on NotFoundError { message } }
          byTag: getChampionsByTag(tag: "tank") { ... on NotFoundError { message } }
          byStat: getChampionsByStatGte(name: "hp", value: 10000) { ... on NotFoundError { message } }
        }"#,
    )
    .await;

    assert_eq!(
        body,
        json!({
            "data": {
                "byName": { "message": "Champion Teemo not found" },
                "byTag": { "message": "No champion found for tag tank" },
                "byStat": { "message": "No champion found with hp >= 10000" }
            }
        })
    );
}

#[actix_web::test]
async fn no_rest_listing() {
    let app = test::init_service(
        App::new().configure(configure_router(system_router(Service::Champions, &[]))),
    )
    .await;

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/countries?first=2").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
