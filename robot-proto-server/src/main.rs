// Copyright © 2026 Robot Recall Contributors
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.

//! ## ACCEPT LOOP
//!
//! The server binary: binds a [`TcpListener`] with `SO_REUSEADDR` set,
//! hands each accepted stream to the [`WorkerPool`] as a
//! [`robot_proto::TcpTransport`], and lets [`robot_proto::Session::run`]
//! drive the connection end to end. No CLI flags, no config file —
//! [`ServerConfig::default`] is the entire surface.

mod pool;

use pool::WorkerPool;
use robot_proto::{ServerConfig, Session, TcpTransport};
use socket2::{Domain, Socket, Type};
use std::net::{SocketAddr, TcpListener};

fn bind_listener(bind_addr: &str) -> std::io::Result<TcpListener> {
    let addr: SocketAddr = bind_addr
        .parse()
        .map_err(|_| std::io::Error::from(std::io::ErrorKind::InvalidInput))?;
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, None)?;
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(128)?;
    Ok(socket.into())
}

fn main() {
    env_logger::init();

    let config = ServerConfig::default();
    let listener = match bind_listener(&config.bind_addr) {
        Ok(listener) => listener,
        Err(error) => {
            log::error!("failed to bind {}: {error}", config.bind_addr);
            std::process::exit(1);
        }
    };

    log::info!(
        "listening on {} with {} worker thread(s)",
        config.bind_addr,
        config.worker_count
    );

    let pool = WorkerPool::new(config.worker_count);

    for incoming in listener.incoming() {
        let stream = match incoming {
            Ok(stream) => stream,
            Err(error) => {
                log::warn!("failed to accept connection: {error}");
                continue;
            }
        };

        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "<unknown>".to_string());

        let session_config = config.clone();
        pool.submit(move || {
            log::debug!("connection opened: {peer}");
            let mut transport = TcpTransport::new(stream);
            Session::run_with_config(&mut transport, &session_config);
            log::debug!("connection closed: {peer}");
        });
    }
}
