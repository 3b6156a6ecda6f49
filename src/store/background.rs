use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use super::{KeyValueStore, StoreError};

enum Request {
    Get {
        key: String,
        reply: Sender<Result<Option<String>, StoreError>>,
    },
    Set {
        key: String,
        value: String,
    },
    Flush {
        reply: Sender<()>,
    },
}

/// Runs another store on a dedicated thread.
///
/// Writes are queued and return as soon as they are handed to the worker;
/// failures are logged there. Requests are served in order, so a `get`
/// observes every `set` issued before it. Clones share one worker, which
/// exits once the last clone is dropped.
#[derive(Debug, Clone)]
pub struct BackgroundStore {
    tx: Sender<Request>,
}

impl BackgroundStore {
    pub fn spawn<S>(inner: S) -> Result<Self, StoreError>
    where
        S: KeyValueStore + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("typepace-store".to_string())
            .spawn(move || serve(inner, rx))?;
        Ok(Self { tx })
    }

    /// Block until every request queued so far has been processed.
    pub fn flush(&self) -> Result<(), StoreError> {
        let (reply, done) = mpsc::channel();
        self.tx
            .send(Request::Flush { reply })
            .map_err(|_| StoreError::Disconnected)?;
        done.recv().map_err(|_| StoreError::Disconnected)
    }
}

fn serve<S: KeyValueStore>(inner: S, rx: Receiver<Request>) {
    for request in rx {
        match request {
            Request::Get { key, reply } => {
                let _ = reply.send(inner.get(&key));
            }
            Request::Set { key, value } => {
                if let Err(e) = inner.set(&key, &value) {
                    log::warn!("failed to write {key}: {e}");
                }
            }
            Request::Flush { reply } => {
                let _ = reply.send(());
            }
        }
    }
    log::debug!("storage worker stopped");
}

impl KeyValueStore for BackgroundStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let (reply, response) = mpsc::channel();
        self.tx
            .send(Request::Get {
                key: key.to_string(),
                reply,
            })
            .map_err(|_| StoreError::Disconnected)?;
        response.recv().map_err(|_| StoreError::Disconnected)?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.tx
            .send(Request::Set {
                key: key.to_string(),
                value: value.to_string(),
            })
            .map_err(|_| StoreError::Disconnected)
    }
}
