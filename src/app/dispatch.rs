//! Effect dispatcher
//!
//! Runs the fetches the session asks for. Each effect gets its own worker
//! thread; the thread calls the gateway and sends the resulting event back to
//! the main loop over an mpsc channel. The main loop drains the channel with
//! `try_recv`, so the UI never blocks on the network.

use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

use tracing::{debug, warn};

use crate::gateway::Gateway;
use crate::logic::cascade::{catalog_from_parts, Effect, Event};

/// Run one effect synchronously and produce the event that answers it.
///
/// Worker threads call this; headless commands call it directly.
pub fn execute(gateway: &dyn Gateway, effect: Effect) -> Event {
    match effect {
        Effect::FetchCatalog { tag } => Event::CatalogLoaded {
            tag,
            result: catalog_from_parts(
                gateway.regions(),
                gateway.operations(),
                gateway.categories(),
                gateway.volume_types(),
            ),
        },
        Effect::FetchFamilies { tag, query } => Event::FamiliesLoaded {
            tag,
            result: gateway.families(&query),
        },
        Effect::FetchSizes { tag, query } => Event::SizesLoaded {
            tag,
            result: gateway.sizes(&query),
        },
        Effect::FetchInstanceProduct { tag, query } => Event::InstanceProductLoaded {
            tag,
            result: gateway.instance_product(&query),
        },
        Effect::FetchVolumeProduct { tag, query } => Event::VolumeProductLoaded {
            tag,
            result: gateway.volume_product(&query),
        },
        Effect::FetchDetail { tag, query } => Event::DetailLoaded {
            tag,
            result: gateway.instance_detail(&query),
        },
    }
}

/// Spawns a worker thread per effect and reports back over a channel.
#[derive(Clone)]
pub struct Dispatcher {
    gateway: Arc<dyn Gateway>,
    tx: Sender<Event>,
}

impl Dispatcher {
    pub fn new(gateway: Arc<dyn Gateway>, tx: Sender<Event>) -> Self {
        Self { gateway, tx }
    }

    /// Start every effect in the background.
    pub fn dispatch_all(&self, effects: Vec<Effect>) {
        for effect in effects {
            self.dispatch(effect);
        }
    }

    /// Start one effect in the background.
    pub fn dispatch(&self, effect: Effect) {
        let tag = effect.tag();
        debug!("Dispatching {} fetch (generation {})", tag.kind, tag.generation);

        let gateway = Arc::clone(&self.gateway);
        let tx = self.tx.clone();
        let inline = effect.clone();
        let spawned = thread::Builder::new()
            .name(format!("fetch-{}", tag.kind))
            .spawn(move || {
                let event = execute(gateway.as_ref(), effect);
                if tx.send(event).is_err() {
                    // Receiver dropped: the app is shutting down
                    debug!("Discarding {} result after shutdown", tag.kind);
                }
            });

        if let Err(e) = spawned {
            warn!("Failed to spawn worker for {} fetch, running inline: {}", tag.kind, e);
            let _ = self.tx.send(execute(self.gateway.as_ref(), inline));
        }
    }
}
