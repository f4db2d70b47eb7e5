//! Loopback HTTP listener that serves the page and waits for one answer.
//!
//! Routes:
//! - `GET /` renders the page
//! - `GET /submit?response=..&mode=..` submits and stops the listener
//! - `GET /cancel` cancels and stops the listener
//!
//! Everything else gets a 404 and the listener keeps going.

use crate::page;
use anyhow::{anyhow, Context, Result};
use services::DialogSession;
use shared::{DialogOutcome, ThinkingMode};
use std::io::Cursor;
use std::net::SocketAddr;
use std::thread::JoinHandle;
use tiny_http::{Header, Method, Request, Response, Server};
use tokio::sync::oneshot;
use url::Url;

/// A dialog bound to a loopback port but not yet serving.
pub struct WebDialog {
    server: Server,
    addr: SocketAddr,
    session: DialogSession,
    recent_limit: usize,
}

/// A dialog whose listener is running on a background thread.
pub struct RunningDialog {
    url: String,
    outcome: oneshot::Receiver<DialogOutcome>,
    worker: JoinHandle<Result<()>>,
}

#[derive(Debug, PartialEq, Eq)]
enum Route {
    Page,
    Submit {
        response: String,
        mode: Option<String>,
    },
    Cancel,
    NotFound,
}

impl WebDialog {
    /// Bind an ephemeral port on 127.0.0.1.
    pub fn bind(session: DialogSession, recent_limit: usize) -> Result<Self> {
        let server = Server::http("127.0.0.1:0")
            .map_err(|e| anyhow!("Could not start dialog listener: {}", e))?;
        let addr = server
            .server_addr()
            .to_ip()
            .ok_or_else(|| anyhow!("Dialog listener is not bound to an IP address"))?;
        tracing::debug!("Dialog listener bound to {}", addr);

        Ok(Self {
            server,
            addr,
            session,
            recent_limit,
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Start the accept loop on a background thread.
    pub fn spawn(self) -> Result<RunningDialog> {
        let url = self.url();
        let (tx, rx) = oneshot::channel();
        let worker = std::thread::Builder::new()
            .name("dialog-listener".into())
            .spawn(move || serve(self.server, self.session, self.recent_limit, tx))
            .context("Failed to spawn dialog listener thread")?;

        Ok(RunningDialog {
            url,
            outcome: rx,
            worker,
        })
    }

    /// Serve the page, optionally open it in the default browser, and block
    /// until the operator submits or cancels.
    pub fn run(self, open_browser: bool) -> Result<DialogOutcome> {
        let running = self.spawn()?;
        if open_browser {
            open_in_browser(running.url());
        } else {
            print_url(running.url());
        }
        running.wait()
    }
}

impl RunningDialog {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Block until the answer arrives. The listener thread has exited, and
    /// its socket is closed, by the time this returns.
    pub fn wait(self) -> Result<DialogOutcome> {
        let outcome = self.outcome.blocking_recv();
        self.worker
            .join()
            .map_err(|_| anyhow!("Dialog listener thread panicked"))??;
        outcome.map_err(|_| anyhow!("Dialog listener stopped without an answer"))
    }
}

fn open_in_browser(url: &str) {
    tracing::info!("Opening {} in the default browser", url);
    if let Err(e) = open::that(url) {
        tracing::warn!("Failed to open browser: {}", e);
        print_url(url);
    }
}

fn print_url(url: &str) {
    eprintln!("Open {} in your browser to answer the prompt", url);
}

fn serve(
    server: Server,
    mut session: DialogSession,
    recent_limit: usize,
    done: oneshot::Sender<DialogOutcome>,
) -> Result<()> {
    loop {
        let request = server
            .recv()
            .context("Dialog listener failed to accept a request")?;

        let matched = route(request.method(), request.url());
        let outcome = match matched {
            Route::Page => {
                reply(request, html_response(page::render(&session, recent_limit)));
                continue;
            }
            Route::NotFound => {
                reply(request, Response::from_string("Not found").with_status_code(404));
                continue;
            }
            Route::Submit { response, mode } => {
                let mode = match mode.as_deref().map(str::parse::<ThinkingMode>) {
                    None => ThinkingMode::default(),
                    Some(Ok(mode)) => mode,
                    Some(Err(e)) => {
                        tracing::warn!("Rejected submission: {}", e);
                        reply(request, Response::from_string(e.to_string()).with_status_code(400));
                        continue;
                    }
                };
                let outcome = session.submit_with(response, mode)?;
                reply(request, Response::from_string("Submitted"));
                outcome
            }
            Route::Cancel => {
                let outcome = session.cancel()?;
                reply(request, Response::from_string("Cancelled"));
                outcome
            }
        };

        // The receiver only goes away if the caller stopped waiting.
        if done.send(outcome).is_err() {
            tracing::debug!("Nobody is waiting for the dialog outcome");
        }
        return Ok(());
    }
}

fn route(method: &Method, raw_url: &str) -> Route {
    if *method != Method::Get {
        return Route::NotFound;
    }
    let url = match Url::parse(&format!("http://localhost{}", raw_url)) {
        Ok(url) => url,
        Err(_) => return Route::NotFound,
    };
    let query = |key: &str| {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    };

    match url.path() {
        "/" => Route::Page,
        "/submit" => Route::Submit {
            response: query("response").unwrap_or_default(),
            mode: query("mode"),
        },
        "/cancel" => Route::Cancel,
        _ => Route::NotFound,
    }
}

fn html_response(body: String) -> Response<Cursor<Vec<u8>>> {
    let response = Response::from_string(body);
    match Header::from_bytes(&b"Content-Type"[..], &b"text/html; charset=utf-8"[..]) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

fn reply<R: std::io::Read>(request: Request, response: Response<R>) {
    if let Err(e) = request.respond(response) {
        tracing::warn!("Failed to answer browser request: {}", e);
    }
}
