use std::collections::HashMap;

use reqwest::{header::HeaderMap, Client, Method, Response};
use serde::{de::DeserializeOwned, Serialize};

#[derive(Clone)]
pub struct RequestParams<'a, B: Serialize + Clone> {
    pub url: &'a str,
    pub method: Method,
    pub body: Option<B>,
    pub query_args: Option<HashMap<&'a str, &'a str>>,
    pub headers: Option<HeaderMap>,
}

pub async fn send_request<B: Serialize + Clone>(
    params: RequestParams<'_, B>,
) -> eyre::Result<Response> {
    let client = Client::new();

    let mut request = client.request(params.method, params.url);

    if let Some(query_args) = &params.query_args {
        request = request.query(query_args);
    }

    if let Some(headers) = params.headers {
        request = request.headers(headers);
    }

    if let Some(body) = &params.body {
        request = request.json(body);
    }

    let response = request.send().await?;

    Ok(response)
}

pub async fn send_http_request<T: DeserializeOwned>(
    params: RequestParams<'_, impl Serialize + Clone>,
) -> eyre::Result<T> {
    let response = send_request(params).await?;

    let status = response.status();
    if !status.is_success() {
        eyre::bail!("Request failed with status: {status}");
    }

    let response_body = response.json::<T>().await?;

    Ok(response_body)
}
