// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{io::ErrorKind, net::SocketAddr, sync::Arc, time::Instant};

use actix_web::{App, HttpServer, middleware, web};
use almanac_env::{EnvError, Environment, SystemEnvironment};
use common::{
    env_const::{
        ALMANAC_SERVER_HOST, DeploymentMode, get_deployment_mode, get_graphql_http_path,
        get_playground_http_path, get_server_port,
    },
    introspection::{IntrospectionMode, introspection_mode},
};
use server_common::Service;
use thiserror::Error;
use tracing_actix_web::TracingLogger;

use crate::configure_router;

#[derive(Error)]
pub enum ServerError {
    #[error("Port {0} is already in use. Check if there is another process running at that port.")]
    PortInUse(u16),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    EnvError(#[from] EnvError),
    #[error("{0}")]
    ServerInitError(#[from] server_common::ServerInitError),
}

// A custom `Debug` implementation for `ServerError` (that delegate to the `Display` impl), so that
// we don't print the default `Debug` implementation's message when the server exits.
impl std::fmt::Debug for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

/// Load the service's dataset and serve it until the process is stopped
pub async fn run(service: Service) -> Result<(), ServerError> {
    let start_time = Instant::now();

    let env: Arc<dyn Environment> = Arc::new(SystemEnvironment);

    let system_router = web::Data::new(server_common::init(service, env.clone())?);

    let server_port = get_server_port(env.as_ref())?;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_router(system_router.clone()))
    });

    let server = match env.get(ALMANAC_SERVER_HOST) {
        Some(host) => server.bind((host, server_port)),
        None => match get_deployment_mode(env.as_ref())? {
            // Binding to "localhost" covers both the IPv4 and the IPv6 loopback addresses
            DeploymentMode::Dev => server.bind(("localhost", server_port)),
            // All interfaces, so that the server is reachable from outside a container
            DeploymentMode::Prod => server.bind(("0.0.0.0", server_port)),
        },
    };

    match server {
        Ok(server) => {
            let pretty_addr = pretty_addr(&server.addrs());

            println!(
                "Started {service:?} server on {} in {:.2} ms",
                pretty_addr,
                start_time.elapsed().as_micros() as f64 / 1000.0
            );
            println!("- GraphQL endpoint hosted at:");
            println!(
                "\thttp://{pretty_addr}{}",
                get_graphql_http_path(env.as_ref())
            );

            if service == Service::Countries {
                println!("- REST endpoint hosted at:");
                println!("\thttp://{pretty_addr}/countries");
            }

            if introspection_mode(env.as_ref())? == IntrospectionMode::Enabled {
                println!("- Playground hosted at:");
                println!(
                    "\thttp://{pretty_addr}{}",
                    get_playground_http_path(env.as_ref())
                );
            }

            Ok(server.run().await?)
        }
        Err(e) => Err(if e.kind() == ErrorKind::AddrInUse {
            ServerError::PortInUse(server_port)
        } else {
            ServerError::Io(e)
        }),
    }
}

fn pretty_addr(addrs: &[SocketAddr]) -> String {
    let loopback_addr = addrs.iter().find(|addr| addr.ip().is_loopback());

    match loopback_addr {
        Some(addr) => format!("localhost:{}", addr.port()),
        None => match addrs {
            // Print single address without square brackets
            [addr] => format!("{addr}"),
            _ => {
                format!("{addrs:?}")
            }
        },
    }
}
