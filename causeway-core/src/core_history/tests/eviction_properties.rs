/*
    eviction_properties.rs - Property tests for the bounded history

    The core eviction law: for any insertion sequence and any batching
    of it, the retained set is the last max_size insertion events in
    order, and the size bound holds after every call.
*/

use crate::core_history::mem_local_history::MemLocalHistory;
use crate::core_history::model::{
    ChannelId, ContentMessage, HistoryEntry, MessageId, SenderId,
};
use proptest::prelude::*;

fn message(id: u32) -> ContentMessage {
    ContentMessage::new(
        MessageId::new(format!("m-{}", id)),
        ChannelId::new("c"),
        SenderId::new("s"),
        vec![],
        id as u128,
        vec![id as u8],
    )
}

proptest! {
    #[test]
    fn batched_and_single_step_insertion_converge(
        ids in proptest::collection::vec(0u32..100, 0..40),
        cuts in proptest::collection::vec(any::<bool>(), 40),
        max_size in 0usize..6,
    ) {
        let mut single = MemLocalHistory::new(max_size);
        for &id in &ids {
            single.add_messages([message(id)]);
            prop_assert!(single.len() <= max_size);
        }

        // Same ids, arbitrarily partitioned into batches
        let mut batched = MemLocalHistory::new(max_size);
        let mut batch = Vec::new();
        for (i, &id) in ids.iter().enumerate() {
            batch.push(message(id));
            if cuts[i] {
                batched.add_messages(batch.drain(..));
                prop_assert!(batched.len() <= max_size);
            }
        }
        batched.add_messages(batch);

        let single_ids: Vec<_> = single.slice(0).iter().map(|m| m.message_id.clone()).collect();
        let batched_ids: Vec<_> = batched.slice(0).iter().map(|m| m.message_id.clone()).collect();
        prop_assert_eq!(single_ids, batched_ids);
    }

    #[test]
    fn retained_set_is_newest_suffix(
        ids in proptest::collection::vec(0u32..100, 0..40),
        max_size in 0usize..6,
    ) {
        let mut hist = MemLocalHistory::new(max_size);
        hist.add_messages(ids.iter().map(|&id| message(id)));

        let expected: Vec<_> = ids
            .iter()
            .skip(ids.len().saturating_sub(max_size))
            .map(|&id| MessageId::new(format!("m-{}", id)))
            .collect();
        let retained: Vec<_> = hist.slice(0).iter().map(|m| m.message_id.clone()).collect();
        prop_assert_eq!(retained, expected);
    }

    #[test]
    fn codec_round_trips_exactly(
        entries in proptest::collection::vec(
            (0u32..50, proptest::option::of(proptest::collection::vec(any::<u8>(), 1..8))),
            0..10
        ),
        timestamp in any::<u128>(),
        bloom in proptest::option::of(proptest::collection::vec(any::<u8>(), 1..16)),
        content in proptest::collection::vec(any::<u8>(), 0..32),
    ) {
        let causal_history = entries
            .into_iter()
            .map(|(id, hint)| HistoryEntry {
                message_id: MessageId::new(format!("dep-{}", id)),
                retrieval_hint: hint,
            })
            .collect();

        let mut msg = ContentMessage::new(
            MessageId::new("m"),
            ChannelId::new("c"),
            SenderId::new("s"),
            causal_history,
            timestamp,
            content,
        );
        msg.bloom_filter = bloom;

        let blob = crate::core_history::codec::encode_messages(std::slice::from_ref(&msg)).unwrap();
        let decoded = crate::core_history::codec::decode_messages(&blob).unwrap();
        prop_assert_eq!(decoded, vec![msg]);
    }
}
