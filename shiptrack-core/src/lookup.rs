use std::borrow::Cow;

use crate::model::{LogEntry, LogSheet, Order, ProviderSnapshot, ShipmentView};

/// Which identifier the reference matched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    OrderRef,
    Consignment,
    ContainerTrip,
    Unmatched,
}

type OrderField = for<'a> fn(&'a Order) -> Option<Cow<'a, str>>;

const TIERS: [(MatchTier, OrderField); 3] = [
    (MatchTier::OrderRef, Order::ref_id),
    (MatchTier::Consignment, Order::consignment_id),
    (MatchTier::ContainerTrip, Order::container_trip_id),
];

/// Orders matched for a reference plus the identifiers used to correlate logs.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentMatch {
    pub tier: MatchTier,
    pub orders: Vec<Order>,
    pub consignment_id: Option<String>,
    pub container_ids: Vec<String>,
    pub order_refs: Vec<String>,
}

impl ShipmentMatch {
    /// Tries the reference as an order ref, then a consignment, then a
    /// container trip. The first tier with any hit wins.
    pub fn find(reference: &str, orders: &[Order]) -> Self {
        for (tier, field) in TIERS {
            let hits: Vec<Order> = orders
                .iter()
                .filter(|order| field(*order).as_deref() == Some(reference))
                .cloned()
                .collect();

            if !hits.is_empty() {
                return Self::from_hits(reference, tier, hits);
            }
        }

        Self {
            tier: MatchTier::Unmatched,
            orders: Vec::new(),
            consignment_id: None,
            container_ids: Vec::new(),
            order_refs: Vec::new(),
        }
    }

    fn from_hits(reference: &str, tier: MatchTier, orders: Vec<Order>) -> Self {
        let consignment_id = orders
            .first()
            .and_then(|order| order.consignment_id())
            .map(Cow::into_owned);

        let mut container_ids = Vec::new();
        for id in orders.iter().filter_map(Order::container_trip_id) {
            push_unique(&mut container_ids, id);
        }

        let mut order_refs = Vec::new();
        if tier == MatchTier::OrderRef {
            order_refs.push(reference.to_string());
        } else {
            for id in orders.iter().filter_map(Order::ref_id) {
                push_unique(&mut order_refs, id);
            }
        }

        Self {
            tier,
            orders,
            consignment_id,
            container_ids,
            order_refs,
        }
    }

    pub fn is_order_ref(&self) -> bool {
        self.tier == MatchTier::OrderRef
    }

    /// Whether a log entry belongs to the matched shipment.
    pub fn admits(&self, log: &LogEntry) -> bool {
        let (Some(entity), Some(sheet)) = (log.entity_id(), log.sheet()) else {
            return false;
        };

        match sheet {
            LogSheet::Orders => self.order_refs.iter().any(|r| *r == entity),
            LogSheet::Containers => self.container_ids.iter().any(|c| *c == entity),
            LogSheet::Consignments => self.consignment_id.as_deref() == Some(&*entity),
        }
    }
}

fn push_unique(ids: &mut Vec<String>, id: Cow<'_, str>) {
    if !ids.iter().any(|existing| *existing == id) {
        ids.push(id.into_owned());
    }
}

/// Filters a provider snapshot down to the orders and logs of one shipment.
pub fn lookup_shipment(reference: &str, snapshot: ProviderSnapshot) -> ShipmentView {
    let matched = ShipmentMatch::find(reference, &snapshot.orders);
    let logs: Vec<LogEntry> = snapshot
        .logs
        .into_iter()
        .filter(|log| matched.admits(log))
        .collect();

    tracing::debug!(
        reference,
        tier = ?matched.tier,
        orders = matched.orders.len(),
        logs = logs.len(),
        "Shipment lookup resolved"
    );

    ShipmentView {
        orders: matched.orders,
        logs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn snapshot(orders: Value, logs: Value) -> ProviderSnapshot {
        ProviderSnapshot::from_value(json!({ "orders": orders, "logs": logs })).unwrap()
    }

    fn orders(raw: Value) -> Vec<Order> {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_order_ref_tier_wins() {
        let orders = orders(json!([
            { "Ref ID": "A", "ConsignmentID": "C1", "ContainerTripID": "T1" },
            { "Ref ID": "B", "ConsignmentID": "A", "ContainerTripID": "T2" },
        ]));

        let matched = ShipmentMatch::find("A", &orders);
        assert_eq!(matched.tier, MatchTier::OrderRef);
        assert!(matched.is_order_ref());
        assert_eq!(matched.orders.len(), 1);
        assert_eq!(matched.order_refs, vec!["A"]);
        assert_eq!(matched.consignment_id.as_deref(), Some("C1"));
        assert_eq!(matched.container_ids, vec!["T1"]);
    }

    #[test]
    fn test_consignment_tier_collects_all_refs() {
        let orders = orders(json!([
            { "Ref ID": "A", "ConsignmentID": "C1" },
            { "Ref ID": "B", "ConsignmentID": "C1" },
            { "Ref ID": "Z", "ConsignmentID": "C9" },
        ]));

        let matched = ShipmentMatch::find("C1", &orders);
        assert_eq!(matched.tier, MatchTier::Consignment);
        assert!(!matched.is_order_ref());
        assert_eq!(matched.orders.len(), 2);
        assert_eq!(matched.order_refs, vec!["A", "B"]);
        assert!(matched.container_ids.is_empty());
    }

    #[test]
    fn test_container_tier_dedupes_identifiers() {
        let orders = orders(json!([
            { "Ref ID": "A", "ConsignmentID": "C1", "ContainerTripID": "T1" },
            { "Ref ID": "A", "ConsignmentID": "C2", "ContainerTripID": "T1" },
            { "Ref ID": "", "ConsignmentID": "C3", "ContainerTripID": "T1" },
        ]));

        let matched = ShipmentMatch::find("T1", &orders);
        assert_eq!(matched.tier, MatchTier::ContainerTrip);
        assert_eq!(matched.orders.len(), 3);
        assert_eq!(matched.order_refs, vec!["A"]);
        assert_eq!(matched.container_ids, vec!["T1"]);
        assert_eq!(matched.consignment_id.as_deref(), Some("C1"));
    }

    #[test]
    fn test_unmatched_reference_is_empty_not_error() {
        let view = lookup_shipment(
            "missing",
            snapshot(
                json!([{ "Ref ID": "A" }]),
                json!([{ "Entity ID": "A", "Sheet": "Orders" }]),
            ),
        );
        assert_eq!(view, ShipmentView::default());
    }

    #[test]
    fn test_logs_follow_matched_identifiers() {
        let view = lookup_shipment(
            "A",
            snapshot(
                json!([{ "Ref ID": "A", "ConsignmentID": "C1", "ContainerTripID": "T1" }]),
                json!([
                    { "Entity ID": "A", "Sheet": "Orders", "Event": "Booked" },
                    { "Entity ID": "B", "Sheet": "Orders", "Event": "Booked" },
                    { "Entity ID": "T1", "Sheet": "Containers", "Event": "Loaded" },
                    { "Entity ID": "T9", "Sheet": "Containers", "Event": "Loaded" },
                    { "Entity ID": "C1", "Sheet": "Consignments", "Event": "Cleared" },
                    { "Entity ID": "A", "Sheet": "Invoices" },
                    { "Sheet": "Orders" },
                    { "Entity ID": "A" },
                ]),
            ),
        );

        let events: Vec<(&str, &str)> = view
            .logs
            .iter()
            .map(|log| {
                (
                    log.fields()["Entity ID"].as_str().unwrap(),
                    log.fields()["Event"].as_str().unwrap(),
                )
            })
            .collect();
        assert_eq!(
            events,
            vec![("A", "Booked"), ("T1", "Loaded"), ("C1", "Cleared")]
        );
    }

    #[test]
    fn test_consignment_logs_need_a_consignment() {
        let view = lookup_shipment(
            "A",
            snapshot(
                json!([{ "Ref ID": "A" }]),
                json!([{ "Entity ID": "", "Sheet": "Consignments" }]),
            ),
        );
        assert_eq!(view.orders.len(), 1);
        assert!(view.logs.is_empty());
    }

    #[test]
    fn test_numeric_identifiers_match_as_text() {
        let view = lookup_shipment(
            "1042",
            snapshot(
                json!([{ "Ref ID": 1042, "ConsignmentID": 77 }]),
                json!([
                    { "Entity ID": 1042, "Sheet": "Orders" },
                    { "Entity ID": "77", "Sheet": "Consignments" },
                ]),
            ),
        );
        assert_eq!(view.orders.len(), 1);
        assert_eq!(view.logs.len(), 2);
    }

    #[test]
    fn test_lookup_is_repeatable() {
        let build = || {
            snapshot(
                json!([
                    { "Ref ID": "A", "ConsignmentID": "C1", "ContainerTripID": "T1" },
                    { "Ref ID": "B", "ConsignmentID": "C1", "ContainerTripID": "T2" },
                ]),
                json!([
                    { "Entity ID": "T2", "Sheet": "Containers" },
                    { "Entity ID": "B", "Sheet": "Orders" },
                ]),
            )
        };
        assert_eq!(lookup_shipment("C1", build()), lookup_shipment("C1", build()));
    }
}
