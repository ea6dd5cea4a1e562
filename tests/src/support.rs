use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc::UnboundedSender;

use launchpad_common::error::LaunchError;
use launchpad_common::models::browser::Browser;
use launchpad_common::models::share::{ServiceAnnouncement, ShareKind};
use launchpad_common::ports::{ProcessSpawner, ServiceBrowser};

/// HTTP server on 127.0.0.1 answering every request with `status`.
/// A `status` of 0 accepts connections and never answers.
pub async fn http_server(status: u16) -> SocketAddr {
    let listener: TcpListener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let mut buf = [0u8; 2048];
                let _ = stream.read(&mut buf).await;
                if status == 0 {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    return;
                }
                let response = format!(
                    "HTTP/1.1 {status} Status\r\nLocation: /elsewhere\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                );
                let _ = stream.write_all(response.as_bytes()).await;
            });
        }
    });

    addr
}

/// Sends a fixed set of announcements, then optionally never returns.
pub struct ScriptedBrowser {
    pub announcements: Vec<ServiceAnnouncement>,
    pub hang: bool,
}

#[async_trait]
impl ServiceBrowser for ScriptedBrowser {
    async fn browse(
        &self,
        _kinds: &[ShareKind],
        tx: UnboundedSender<ServiceAnnouncement>,
    ) -> anyhow::Result<()> {
        for announcement in &self.announcements {
            let _ = tx.send(announcement.clone());
        }
        if self.hang {
            std::future::pending::<()>().await;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Spawned {
    DefaultHandler(String),
    Browser(String, String),
    Terminal(Vec<String>),
    App(String, Vec<String>),
}

#[derive(Default)]
pub struct RecordingSpawner {
    pub spawned: Arc<Mutex<Vec<Spawned>>>,
}

impl RecordingSpawner {
    pub fn spawned(&self) -> Vec<Spawned> {
        self.spawned.lock().unwrap().clone()
    }

    fn record(&self, what: Spawned) {
        self.spawned.lock().unwrap().push(what);
    }
}

#[async_trait]
impl ProcessSpawner for RecordingSpawner {
    fn platform(&self) -> &'static str {
        "recording"
    }

    async fn open_url(&self, url: &str) -> Result<(), LaunchError> {
        self.record(Spawned::DefaultHandler(url.to_string()));
        Ok(())
    }

    async fn open_url_with(&self, browser: &Browser, url: &str) -> Result<(), LaunchError> {
        self.record(Spawned::Browser(browser.id.clone(), url.to_string()));
        Ok(())
    }

    async fn open_terminal(&self, command: &[String]) -> Result<(), LaunchError> {
        self.record(Spawned::Terminal(command.to_vec()));
        Ok(())
    }

    async fn launch_app(&self, app_path: &str, args: &[String]) -> Result<(), LaunchError> {
        self.record(Spawned::App(app_path.to_string(), args.to_vec()));
        Ok(())
    }
}
