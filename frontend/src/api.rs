use chatmind::ClientConfig;
use chatmind::ClientError;
use chatmind::api::{ApiClient, HttpRequest, HttpResponse, HttpTransport, Method};
use gloo_net::http::Request;

/// `fetch` through gloo-net. Non-2xx responses are returned as-is; the core
/// client decides what they mean.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
        };
        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }

        let resp = match request.body {
            Some(body) => {
                builder
                    .header("Content-Type", "application/json")
                    .body(body)
                    .map_err(network_error)?
                    .send()
                    .await
            }
            None => builder.send().await,
        }
        .map_err(network_error)?;

        let status = resp.status();
        let body = resp.text().await.map_err(network_error)?;
        Ok(HttpResponse { status, body })
    }
}

fn network_error(e: gloo_net::Error) -> ClientError {
    ClientError::Network(e.to_string())
}

pub fn client(config: &ClientConfig) -> ApiClient<GlooTransport> {
    ApiClient::new(GlooTransport, config)
}
