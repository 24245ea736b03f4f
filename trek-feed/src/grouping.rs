//! Collapses runs of related events into one grouped event. The windowing
//! policy (how far apart events may be and still group) belongs to the
//! caller; this module only merges what it is handed.

use trek_models::{EventKind, FeedEvent};

use crate::error::{FeedError, FeedResult};

/// Merge a non-empty run of same-kind, same-actor, same-target groupable
/// events into one synthetic grouped event. Member reference ids keep
/// their order; the originating event ids ride along in
/// `grouped_event_ids` so the caller can acknowledge them later.
pub fn merge_group(events: &[FeedEvent]) -> FeedResult<FeedEvent> {
    let first = events.first().ok_or_else(|| {
        FeedError::invalid("cannot group an empty event sequence")
    })?;
    let grouped_kind = first.kind.grouped_counterpart().ok_or_else(|| {
        FeedError::invalid(format!(
            "{} events are not groupable",
            first.kind.as_tag()
        ))
    })?;
    let target = first.group_target();
    for event in &events[1..] {
        if event.kind != first.kind
            || event.actor_id != first.actor_id
            || event.group_target() != target
        {
            return Err(FeedError::invalid(
                "grouped events must share kind, actor and target",
            ));
        }
    }

    let mut grouped_refs = Vec::with_capacity(events.len());
    for event in events {
        let member = event.group_member_ref().ok_or_else(|| {
            FeedError::invalid(format!(
                "event {} has no reference id to group",
                event.id
            ))
        })?;
        grouped_refs.push(member);
    }

    let occurred_at = events
        .iter()
        .map(|event| event.occurred_at)
        .max()
        .unwrap_or(first.occurred_at);

    Ok(FeedEvent {
        id: first.id,
        kind: grouped_kind,
        actor_id: first.actor_id,
        ref_id: match grouped_kind {
            EventKind::GroupedTripUpdates => first.ref_id,
            _ => None,
        },
        dest_id: match grouped_kind {
            EventKind::MultipleDestinationPhotoLinks => first.dest_id,
            _ => None,
        },
        grouped_ref_ids: Some(grouped_refs),
        grouped_event_ids: Some(
            events.iter().map(|event| event.id).collect(),
        ),
        occurred_at,
    })
}

/// Walk a caller-supplied window in order and merge adjacent runs sharing
/// a merge key. Singletons and non-groupable kinds pass through untouched,
/// so the output mixes plain and grouped events uniformly.
pub fn coalesce(events: Vec<FeedEvent>) -> FeedResult<Vec<FeedEvent>> {
    let mut out = Vec::with_capacity(events.len());
    let mut run: Vec<FeedEvent> = Vec::new();

    for event in events {
        if event.kind.grouped_counterpart().is_none() {
            flush_run(&mut run, &mut out)?;
            out.push(event);
            continue;
        }
        let continues_run = run.first().is_some_and(|head| {
            head.kind == event.kind
                && head.actor_id == event.actor_id
                && head.group_target() == event.group_target()
        });
        if !continues_run {
            flush_run(&mut run, &mut out)?;
        }
        run.push(event);
    }
    flush_run(&mut run, &mut out)?;
    Ok(out)
}

fn flush_run(
    run: &mut Vec<FeedEvent>,
    out: &mut Vec<FeedEvent>,
) -> FeedResult<()> {
    if run.len() > 1 {
        out.push(merge_group(run)?);
        run.clear();
    } else {
        out.append(run);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(id: u64, actor: u64, photo: u64) -> FeedEvent {
        FeedEvent {
            id,
            kind: EventKind::UploadedUserPhoto,
            actor_id: actor,
            ref_id: Some(photo),
            dest_id: None,
            grouped_ref_ids: None,
            grouped_event_ids: None,
            occurred_at: 1_000 + id as i64,
        }
    }

    fn link(id: u64, actor: u64, photo: u64, dest: u64) -> FeedEvent {
        FeedEvent {
            id,
            kind: EventKind::LinkDestinationPhoto,
            actor_id: actor,
            ref_id: Some(photo),
            dest_id: Some(dest),
            grouped_ref_ids: None,
            grouped_event_ids: None,
            occurred_at: 1_000 + id as i64,
        }
    }

    fn trip_update(id: u64, actor: u64, trip: u64, dest: u64) -> FeedEvent {
        FeedEvent {
            id,
            kind: EventKind::UpdatedExistingTrip,
            actor_id: actor,
            ref_id: Some(trip),
            dest_id: Some(dest),
            grouped_ref_ids: None,
            grouped_event_ids: None,
            occurred_at: 1_000 + id as i64,
        }
    }

    #[test]
    fn merges_uploads_into_gallery_event() {
        let merged =
            merge_group(&[upload(1, 7, 31), upload(2, 7, 32), upload(3, 7, 33)])
                .unwrap();
        assert_eq!(merged.kind, EventKind::MultipleGalleryPhotos);
        assert_eq!(merged.actor_id, 7);
        assert_eq!(merged.grouped_ref_ids, Some(vec![31, 32, 33]));
        assert_eq!(merged.grouped_event_ids, Some(vec![1, 2, 3]));
        assert_eq!(merged.occurred_at, 1_003);
    }

    #[test]
    fn merged_photo_links_keep_their_destination() {
        let merged =
            merge_group(&[link(1, 7, 31, 50), link(2, 7, 32, 50)]).unwrap();
        assert_eq!(merged.kind, EventKind::MultipleDestinationPhotoLinks);
        assert_eq!(merged.dest_id, Some(50));
        assert_eq!(merged.grouped_ref_ids, Some(vec![31, 32]));
    }

    #[test]
    fn merged_trip_updates_keep_the_trip_and_collect_destinations() {
        let merged =
            merge_group(&[trip_update(1, 7, 9, 41), trip_update(2, 7, 9, 42)])
                .unwrap();
        assert_eq!(merged.kind, EventKind::GroupedTripUpdates);
        assert_eq!(merged.ref_id, Some(9));
        assert_eq!(merged.grouped_ref_ids, Some(vec![41, 42]));
    }

    #[test]
    fn empty_sequence_is_invalid() {
        let err = merge_group(&[]).unwrap_err();
        assert!(err.is_invalid());
    }

    #[test]
    fn mixed_actors_are_invalid() {
        let err = merge_group(&[upload(1, 7, 31), upload(2, 8, 32)])
            .unwrap_err();
        assert!(err.is_invalid());
    }

    #[test]
    fn mixed_targets_are_invalid() {
        let err = merge_group(&[link(1, 7, 31, 50), link(2, 7, 32, 51)])
            .unwrap_err();
        assert!(err.is_invalid());
    }

    #[test]
    fn non_groupable_kind_is_invalid() {
        let mut event = upload(1, 7, 31);
        event.kind = EventKind::CreatedNewTrip;
        assert!(merge_group(&[event]).unwrap_err().is_invalid());
    }

    #[test]
    fn coalesce_merges_adjacent_runs_only() {
        let out = coalesce(vec![
            upload(1, 7, 31),
            upload(2, 7, 32),
            link(3, 7, 33, 50),
            upload(4, 7, 34),
        ])
        .unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].kind, EventKind::MultipleGalleryPhotos);
        assert_eq!(out[0].grouped_ref_ids, Some(vec![31, 32]));
        assert_eq!(out[1].kind, EventKind::LinkDestinationPhoto);
        assert_eq!(out[2].kind, EventKind::UploadedUserPhoto);
    }

    #[test]
    fn coalesce_keeps_singletons_and_plain_kinds_untouched() {
        let mut create = upload(5, 7, 0);
        create.kind = EventKind::CreatedNewDestination;
        create.ref_id = Some(60);
        let out =
            coalesce(vec![upload(1, 7, 31), create.clone()]).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].kind, EventKind::UploadedUserPhoto);
        assert_eq!(out[1], create);
    }

    #[test]
    fn coalesce_splits_runs_on_actor_change() {
        let out = coalesce(vec![
            upload(1, 7, 31),
            upload(2, 7, 32),
            upload(3, 8, 33),
            upload(4, 8, 34),
        ])
        .unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].actor_id, 7);
        assert_eq!(out[1].actor_id, 8);
        assert_eq!(out[1].grouped_ref_ids, Some(vec![33, 34]));
    }
}
