use proptest::prelude::*;
use rsvpfold::{GuestRecord, RsvpStatus, compute_stats};

fn arb_rsvp() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(Some("Yes".to_string())),
        Just(Some("No".to_string())),
        Just(Some(String::new())),
        Just(None),
        "[ a-zA-Z]{0,8}".prop_map(Some),
    ]
}

fn arb_guest() -> impl Strategy<Value = GuestRecord> {
    ("[A-Za-z ]{0,16}", arb_rsvp()).prop_map(|(name, rsvp)| GuestRecord {
        name,
        rsvp,
        ..GuestRecord::default()
    })
}

fn arb_guest_list() -> impl Strategy<Value = Vec<GuestRecord>> {
    proptest::collection::vec(arb_guest(), 0..64)
}

proptest! {
    #[test]
    fn prop_buckets_partition_total(list in arb_guest_list()) {
        let stats = compute_stats(&list);
        prop_assert_eq!(stats.total, list.len() as u64);
        prop_assert_eq!(stats.attending + stats.not_attending + stats.pending, stats.total);
    }

    #[test]
    fn prop_bucket_counts_match_classification(list in arb_guest_list()) {
        let stats = compute_stats(&list);
        let count = |want: RsvpStatus| list.iter().filter(|g| g.status() == want).count() as u64;
        prop_assert_eq!(stats.attending, count(RsvpStatus::Attending));
        prop_assert_eq!(stats.not_attending, count(RsvpStatus::NotAttending));
        prop_assert_eq!(stats.pending, count(RsvpStatus::Pending));
    }

    #[test]
    fn prop_only_exact_literals_are_recognized(raw in "[ a-zA-Z]{0,8}") {
        let status = RsvpStatus::classify(Some(&raw));
        let expected = match raw.as_str() {
            "Yes" => RsvpStatus::Attending,
            "No" => RsvpStatus::NotAttending,
            _ => RsvpStatus::Pending,
        };
        prop_assert_eq!(status, expected);
    }

    #[test]
    fn prop_compute_is_idempotent(list in arb_guest_list()) {
        let before = list.clone();
        prop_assert_eq!(compute_stats(&list), compute_stats(&list));
        prop_assert_eq!(list, before);
    }
}
