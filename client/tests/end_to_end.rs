//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Client sessions against a mock receiver over real TCP

use avremote_client::{AvrClient, ClientConfig, ClientError, Request, TransportError};
use avremote_protocol::{Action, Category, CommandCode};
use std::collections::VecDeque;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Scripted receiver accepting a single connection.
///
/// Each received line is recorded. When it equals the head of the script the
/// scripted bytes are written back in one write.
struct MockReceiver {
    port: u16,
    handle: JoinHandle<Vec<String>>,
}

impl MockReceiver {
    async fn start(script: &[(&str, &str)]) -> Self {
        Self::start_with(script, false).await
    }

    async fn start_with(script: &[(&str, &str)], hang_up_when_done: bool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let mut script: VecDeque<(String, String)> = script
            .iter()
            .map(|(code, reply)| ((*code).to_string(), (*reply).to_string()))
            .collect();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut buffer = Vec::new();
            let mut chunk = [0u8; 64];
            loop {
                if hang_up_when_done && script.is_empty() {
                    break;
                }
                let read = socket.read(&mut chunk).await.unwrap_or(0);
                if read == 0 {
                    break;
                }
                buffer.extend_from_slice(&chunk[..read]);
                while let Some(end) = buffer.iter().position(|b| *b == b'\r') {
                    let line = String::from_utf8_lossy(&buffer[..end]).to_string();
                    buffer.drain(..=end);
                    if script.front().is_some_and(|(code, _)| *code == line) {
                        if let Some((_, reply)) = script.pop_front() {
                            socket.write_all(reply.as_bytes()).await.unwrap();
                        }
                    }
                    received.push(line);
                }
            }
            received
        });
        Self { port, handle }
    }

    fn config(&self) -> ClientConfig {
        ClientConfig::new("127.0.0.1", self.port)
            .with_read_timeout(Duration::from_millis(200))
            .with_response_timeout(Duration::from_secs(2))
            .with_drain_timeout(Duration::from_millis(100))
    }

    /// Lines received, available once the client has closed the connection.
    async fn received(self) -> Vec<String> {
        self.handle.await.unwrap()
    }
}

fn control(category: Category, action: &str) -> Request {
    Request::control(category, Action::parse(category, action).unwrap())
}

#[tokio::test]
async fn toggles_power_on_from_standby() {
    let receiver = MockReceiver::start(&[
        ("PW?", "PWSTANDBY\r"),
        ("PWON", "ZMON\r"),
        ("PW?", "PWON\r"),
    ])
    .await;
    let client = AvrClient::new(receiver.config());

    let response = client.execute(&control(Category::Power, "toggle")).await.unwrap();

    assert_eq!(response.reading().label, "Power State:");
    assert_eq!(response.reading().value, "ON");
    assert_eq!(receiver.received().await, vec!["PW?", "PWON", "PW?"]);
}

#[tokio::test]
async fn volume_status_ignores_concatenated_max_volume() {
    let receiver = MockReceiver::start(&[("MV?", "MV425\rMVMAX 60\r")]).await;
    let client = AvrClient::new(receiver.config());

    let response = client.execute(&control(Category::Volume, "status")).await.unwrap();

    assert_eq!(response.reading().to_string(), "Volume Level: 42.5");
    assert_eq!(receiver.received().await, vec!["MV?"]);
}

#[tokio::test]
async fn volume_level_in_standby_reports_power() {
    let receiver = MockReceiver::start(&[("MV?", "MV30\rMVMAX 60\r"), ("PW?", "PWSTANDBY\r")]).await;
    let client = AvrClient::new(receiver.config());

    let response = client.execute(&control(Category::Volume, "42")).await.unwrap();

    assert_eq!(response.reading().to_string(), "Power State: STANDBY");
    assert_eq!(receiver.received().await, vec!["MV?", "PW?"]);
}

#[tokio::test]
async fn source_change_is_confirmed() {
    let receiver = MockReceiver::start(&[
        ("SI?", "SIDVD\r"),
        ("PW?", "PWON\r"),
        ("SIBT", ""),
        ("SI?", "SIBT\r"),
    ])
    .await;
    let client = AvrClient::new(receiver.config());

    let response = client.execute(&control(Category::Source, "bluetooth")).await.unwrap();

    assert_eq!(response.reading().to_string(), "Source Input: Bluetooth");
    assert_eq!(receiver.received().await, vec!["SI?", "PW?", "SIBT", "SI?"]);
}

#[tokio::test]
async fn passthrough_returns_raw_line() {
    let receiver = MockReceiver::start(&[("PSFRONT?", "PSFRONT SPA\r")]).await;
    let client = AvrClient::new(receiver.config());
    let code = CommandCode::raw("psfront?").unwrap();

    let response = client.execute(&Request::passthrough(code)).await.unwrap();

    assert_eq!(response.reading().to_string(), "Response: PSFRONT SPA");
    assert_eq!(receiver.received().await, vec!["PSFRONT?"]);
}

#[tokio::test]
async fn silent_receiver_is_queried_again_then_fails() {
    let receiver = MockReceiver::start(&[]).await;
    let config = receiver
        .config()
        .with_read_timeout(Duration::from_millis(50))
        .with_max_attempts(3);
    let client = AvrClient::new(config);

    let err = client.execute(&control(Category::Mute, "status")).await.unwrap_err();

    assert!(err.is_receive_failure());
    assert_eq!(err.exit_code(), 5);
    assert_eq!(receiver.received().await, vec!["MU?", "MU?", "MU?"]);
}

#[tokio::test]
async fn hang_up_is_a_receive_failure() {
    let receiver = MockReceiver::start_with(&[("PW?", "PW")], true).await;
    let client = AvrClient::new(receiver.config());

    let err = client.execute(&control(Category::Power, "status")).await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::ReceiveFailed {
            source: TransportError::Closed,
            ..
        }
    ));
    assert_eq!(receiver.received().await, vec!["PW?"]);
}

#[tokio::test]
async fn unreachable_receiver_is_a_connect_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let client = AvrClient::new(
        ClientConfig::new("127.0.0.1", port).with_connect_timeout(Duration::from_secs(1)),
    );

    let err = client.execute(&control(Category::Power, "status")).await.unwrap_err();

    assert!(err.is_connect_failure());
    assert_eq!(err.exit_code(), 3);
}
