//! Seeds the in-memory stores with a small travel data set, runs a batch
//! of events through the resolver and prints the resulting feed items as
//! JSON lines.

use std::sync::Arc;

use envconfig::Envconfig;
use tracing::info;
use trek_feed::grouping;
use trek_feed::{FeedResolver, ResolverConfig};
use trek_models::{
    Destination, EventKind, FeedEvent, Photo, Profile, Trip,
};
use trek_store::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let conf = ResolverConfig::init_from_env()?;

    let store = MemoryStore::new();
    seed(&store).await;

    let store = Arc::new(store);
    let resolver = FeedResolver::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        &conf,
    );

    let events = grouping::coalesce(sample_events())?;
    info!("resolving {} events", events.len());

    for result in resolver.resolve_batch(&events).await {
        match result {
            Ok(item) => println!("{}", serde_json::to_string(&item)?),
            Err(err) => eprintln!("resolution failed: {}", err),
        }
    }
    Ok(())
}

async fn seed(store: &MemoryStore) {
    store
        .insert_profile(Profile {
            user_id: 1,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            avatar_thumbnail: Some("thumbnails/jane.jpg".to_string()),
        })
        .await;
    let fiordland = Destination {
        id: 10,
        name: "Fiordland".to_string(),
        country: Some("New Zealand".to_string()),
    };
    let queenstown = Destination {
        id: 11,
        name: "Queenstown".to_string(),
        country: Some("New Zealand".to_string()),
    };
    let rotorua = Destination {
        id: 12,
        name: "Rotorua".to_string(),
        country: Some("New Zealand".to_string()),
    };
    store.insert_destination(fiordland.clone()).await;
    store.insert_destination(queenstown.clone()).await;
    store.insert_destination(rotorua.clone()).await;
    store
        .insert_trip(Trip {
            id: 20,
            user_id: 1,
            destinations: vec![fiordland, queenstown, rotorua],
        })
        .await;
    for id in 30..34 {
        store
            .insert_photo(Photo {
                id,
                filename: format!("photos/{id}.jpg"),
                thumbnail_filename: Some(format!("thumbnails/{id}.jpg")),
            })
            .await;
    }
}

fn sample_events() -> Vec<FeedEvent> {
    let event = |id, kind, ref_id, dest_id| FeedEvent {
        id,
        kind,
        actor_id: 1,
        ref_id,
        dest_id,
        grouped_ref_ids: None,
        grouped_event_ids: None,
        occurred_at: 1_700_000_000_000 + id as i64,
    };
    vec![
        event(1, EventKind::CreatedNewDestination, Some(10), None),
        event(2, EventKind::CreatedNewTrip, Some(20), None),
        // A run of three uploads; coalesce folds them into one gallery.
        event(3, EventKind::UploadedUserPhoto, Some(30), None),
        event(4, EventKind::UploadedUserPhoto, Some(31), None),
        event(5, EventKind::UploadedUserPhoto, Some(32), None),
        event(6, EventKind::NewPrimaryDestinationPhoto, Some(33), Some(11)),
    ]
}
