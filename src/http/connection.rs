use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::http::multipart;
use crate::http::parser::{RequestError, read_request};
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::storage::resolver::{self, Resolution};
use crate::storage::uploads;

/// Handles one client connection: exactly one request, one response, then
/// close. Generic over the stream so tests can drive it with an in-memory
/// duplex pipe.
pub struct Connection<S> {
    stream: BufReader<S>,
    config: Config,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Dispatch(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, config: Config) -> Self {
        Self {
            stream: BufReader::new(stream),
            config,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    match read_request(&mut self.stream).await {
                        Ok(req) => {
                            self.state = ConnectionState::Dispatch(req);
                        }
                        Err(RequestError::Io(e)) => {
                            // Transport failure before a request existed;
                            // nothing useful can be written back.
                            return Err(e.into());
                        }
                        Err(e) => {
                            warn!("Rejecting request: {:?}", e);
                            let writer = ResponseWriter::new(&Self::rejection(&e));
                            self.state = ConnectionState::Writing(writer);
                        }
                    }
                }

                ConnectionState::Dispatch(req) => {
                    let response = Self::handle(&self.config, req).await;

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    self.stream.flush().await?;

                    // One request per connection, always.
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    if let Err(e) = self.stream.shutdown().await {
                        warn!("Error closing connection: {}", e);
                    }
                    break;
                }
            }
        }

        Ok(())
    }

    fn rejection(err: &RequestError) -> Response {
        match err {
            RequestError::Empty | RequestError::Malformed => Response::bad_request(),
            RequestError::UnsupportedVersion(_) => Response::version_not_supported(),
            RequestError::UnsupportedMethod(_) => Response::not_implemented(),
            RequestError::Io(_) => Response::internal_error(),
        }
    }

    async fn handle(config: &Config, req: &Request) -> Response {
        match req.method {
            Method::Get => Self::handle_get(config, req).await,
            Method::Post => Self::handle_post(config, req).await,
        }
    }

    async fn handle_get(config: &Config, req: &Request) -> Response {
        if req.target == "/api/images" {
            return Self::list_images(config).await;
        }

        match resolver::resolve(&config.base_dir, &req.target).await {
            Resolution::File { body, mime } => {
                info!("[200 OK] Serving {} ({})", req.target, mime);
                Response::file(mime, body)
            }
            Resolution::Escape => {
                warn!("Blocked path escape attempt: {}", req.target);
                Response::not_found()
            }
            Resolution::NotFound => {
                info!("[404] Resource not found: {}", req.target);
                Response::not_found()
            }
        }
    }

    async fn list_images(config: &Config) -> Response {
        let names = match uploads::list_images(&config.uploads_dir).await {
            Ok(names) => names,
            Err(e) => {
                warn!("Failed to read uploads directory: {}", e);
                Vec::new()
            }
        };

        match serde_json::to_vec(&names) {
            Ok(body) => Response::json(body),
            Err(e) => {
                error!("Failed to serialize image listing: {}", e);
                Response::internal_error()
            }
        }
    }

    async fn handle_post(config: &Config, req: &Request) -> Response {
        let content_type = req.header("Content-Type").unwrap_or("");
        if !content_type.contains("multipart/form-data") {
            warn!("POST without multipart/form-data content type");
            return Response::bad_request();
        }

        let Some(boundary) = multipart::boundary(content_type) else {
            warn!("Multipart request without a boundary parameter");
            return Response::bad_request();
        };

        let body = req.body.as_deref().unwrap_or(&[]);
        let entries = multipart::parse(body, boundary);
        info!("Multipart body produced {} file entries", entries.len());

        for entry in &entries {
            if !entry.accepted {
                info!("Rejected upload (extension not allowed): {}", entry.file_name);
                continue;
            }

            match uploads::save(&config.uploads_dir, entry).await {
                Ok(()) => info!("Stored upload: {}", entry.file_name),
                Err(e) => error!("Failed to store upload {}: {}", entry.file_name, e),
            }
        }

        Response::upload_success()
    }
}
