use crate::models::{
    Culture, CultureStats, CultureTimeline, EventKind, ProductType, TimelineEvent, Treatment,
};
use indexmap::IndexMap;

/// Type used for a non-tank-mix treatment that has no typed first product.
pub const FALLBACK_EVENT_TYPE: ProductType = ProductType::Fertilizer;

/// Rollups and timelines over an in-memory treatment history.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticsAggregator;

impl AnalyticsAggregator {
    pub fn culture_stats(&self, treatments: &[Treatment]) -> Vec<CultureStats> {
        compute_culture_stats(treatments)
    }

    pub fn timeline(&self, treatments: &[Treatment], culture: Culture) -> CultureTimeline {
        build_timeline(treatments, culture)
    }
}

/// Per-culture statistics, busiest culture first.
///
/// Groups are accumulated in first-seen order; the final sort is stable, so
/// cultures with equal totals keep that order.
pub fn compute_culture_stats(treatments: &[Treatment]) -> Vec<CultureStats> {
    let mut groups: IndexMap<Culture, CultureStats> = IndexMap::new();

    for treatment in treatments {
        let stats = groups
            .entry(treatment.culture)
            .or_insert_with(|| CultureStats::new(treatment.culture));

        stats.total_treatments += 1;

        if treatment.completed {
            stats.completed_treatments += 1;
            if let Some(date) = treatment.actual_date {
                stats.last_treatment = Some(match stats.last_treatment {
                    Some(current) => current.max(date),
                    None => date,
                });
            }
        } else {
            stats.planned_treatments += 1;
        }

        for product in &treatment.chemical_products {
            stats.products_used.insert(product.name.clone());
        }

        if treatment.is_tank_mix {
            stats.tank_mix_count += 1;
            stats.tank_mix_types.insert(type_signature(treatment));
        }
    }

    let mut stats: Vec<CultureStats> = groups.into_values().collect();
    stats.sort_by(|a, b| b.total_treatments.cmp(&a.total_treatments));
    stats
}

/// Sorted distinct product types of one treatment.
fn type_signature(treatment: &Treatment) -> Vec<ProductType> {
    let mut types: Vec<ProductType> = treatment
        .chemical_products
        .iter()
        .filter_map(|p| p.product_type)
        .collect();
    types.sort();
    types.dedup();
    types
}

/// Chronological planned and completed events for one culture.
pub fn build_timeline(treatments: &[Treatment], culture: Culture) -> CultureTimeline {
    let mut events = Vec::new();

    for treatment in treatments.iter().filter(|t| t.culture == culture) {
        let (kind, tank_mix_types) = if treatment.is_tank_mix {
            let types: Vec<ProductType> = treatment
                .chemical_products
                .iter()
                .filter_map(|p| p.product_type)
                .collect();
            (EventKind::TankMix, Some(types))
        } else {
            let first = treatment
                .chemical_products
                .first()
                .and_then(|p| p.product_type)
                .unwrap_or(FALLBACK_EVENT_TYPE);
            (EventKind::Product(first), None)
        };

        let event = |date, completed| TimelineEvent {
            treatment_id: treatment.id,
            date,
            products: treatment.product_names(),
            kind,
            completed,
            tank_mix_types: tank_mix_types.clone(),
        };

        if let (Some(due), false) = (treatment.due_date, treatment.completed) {
            events.push(event(due, false));
        }
        if let (Some(actual), true) = (treatment.actual_date, treatment.completed) {
            events.push(event(actual, true));
        }
    }

    events.sort_by_key(|e| e.date);

    CultureTimeline {
        culture,
        treatments: events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fungicide(name: &str) -> Product {
        Product::new(name, ProductType::Fungicide)
    }

    fn apple_history() -> Vec<Treatment> {
        vec![
            Treatment::new(1, Culture::Apple, 2.0)
                .completed_on(date(2024, 3, 1))
                .with_product(fungicide("Score")),
            Treatment::new(2, Culture::Apple, 2.0)
                .completed_on(date(2024, 5, 10))
                .with_product(fungicide("Horus")),
            Treatment::new(3, Culture::Apple, 2.0)
                .with_due_date(date(2024, 6, 1))
                .with_product(fungicide("Score")),
        ]
    }

    #[test]
    fn stats_for_apple_history() {
        let stats = compute_culture_stats(&apple_history());
        assert_eq!(stats.len(), 1);

        let apple = &stats[0];
        assert_eq!(apple.culture, Culture::Apple);
        assert_eq!(apple.total_treatments, 3);
        assert_eq!(apple.completed_treatments, 2);
        assert_eq!(apple.planned_treatments, 1);
        assert_eq!(apple.last_treatment, Some(date(2024, 5, 10)));
        let products: Vec<&str> = apple.products_used.iter().map(String::as_str).collect();
        assert_eq!(products, vec!["Score", "Horus"]);
        assert_eq!(apple.tank_mix_count, 0);
        assert!(apple.tank_mix_types.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_results() {
        assert!(compute_culture_stats(&[]).is_empty());
        let timeline = build_timeline(&[], Culture::Apple);
        assert_eq!(timeline.culture, Culture::Apple);
        assert!(timeline.is_empty());
    }

    #[test]
    fn stats_sorted_by_total_descending_with_stable_ties() {
        let treatments = vec![
            Treatment::new(1, Culture::Pear, 1.0).with_product(fungicide("A")),
            Treatment::new(2, Culture::Potato, 1.0).with_product(fungicide("A")),
            Treatment::new(3, Culture::Wheat, 1.0).with_product(fungicide("A")),
            Treatment::new(4, Culture::Wheat, 1.0).with_product(fungicide("B")),
        ];
        let order: Vec<Culture> = compute_culture_stats(&treatments)
            .iter()
            .map(|s| s.culture)
            .collect();
        assert_eq!(order, vec![Culture::Wheat, Culture::Pear, Culture::Potato]);
    }

    #[test]
    fn totals_always_balance() {
        let mut treatments = apple_history();
        treatments.push(Treatment::new(9, Culture::Corn, 3.0));
        let mut odd = Treatment::new(10, Culture::Corn, 3.0);
        odd.completed = true;
        treatments.push(odd);

        for s in compute_culture_stats(&treatments) {
            assert_eq!(
                s.total_treatments,
                s.completed_treatments + s.planned_treatments
            );
        }
    }

    #[test]
    fn completed_without_date_does_not_move_last_treatment() {
        let mut undated = Treatment::new(1, Culture::Plum, 1.0);
        undated.completed = true;
        let stats = compute_culture_stats(&[undated]);
        assert_eq!(stats[0].completed_treatments, 1);
        assert_eq!(stats[0].last_treatment, None);
        assert!(stats[0].products_used.is_empty());
    }

    #[test]
    fn tank_mix_signatures_are_order_normalized() {
        let treatments = vec![
            Treatment::new(1, Culture::Grape, 1.0)
                .tank_mix()
                .with_product(Product::new("Karate", ProductType::Insecticide))
                .with_product(fungicide("Topaz")),
            Treatment::new(2, Culture::Grape, 1.0)
                .tank_mix()
                .with_product(fungicide("Quadris"))
                .with_product(Product::new("Decis", ProductType::Insecticide))
                .with_product(fungicide("Topaz")),
            Treatment::new(3, Culture::Grape, 1.0)
                .tank_mix()
                .with_product(fungicide("Topaz"))
                .with_product(Product::new("Urea", ProductType::Fertilizer)),
        ];
        let stats = compute_culture_stats(&treatments);
        let grape = &stats[0];
        assert_eq!(grape.tank_mix_count, 3);
        let signatures: Vec<&Vec<ProductType>> = grape.tank_mix_types.iter().collect();
        assert_eq!(
            signatures,
            vec![
                &vec![ProductType::Fungicide, ProductType::Insecticide],
                &vec![ProductType::Fertilizer, ProductType::Fungicide],
            ]
        );
    }

    #[test]
    fn untyped_tank_mix_counts_without_a_label() {
        let mut a = Product::new("Mystery", ProductType::Adjuvant);
        a.product_type = None;
        let mut b = Product::new("Unknown", ProductType::Adjuvant);
        b.product_type = None;
        let treatment = Treatment::new(1, Culture::Grape, 1.0)
            .tank_mix()
            .with_product(a)
            .with_product(b);

        let stats = compute_culture_stats(&[treatment]);
        assert_eq!(stats[0].tank_mix_count, 1);
        assert!(stats[0].tank_mix_types.contains(&Vec::new()));
        assert!(stats[0].tank_mix_labels().is_empty());
    }

    #[test]
    fn repeated_products_are_recorded_once() {
        let treatments = vec![
            Treatment::new(1, Culture::Plum, 1.0).with_product(fungicide("Score")),
            Treatment::new(2, Culture::Plum, 1.0)
                .tank_mix()
                .with_product(fungicide("Horus"))
                .with_product(fungicide("Score")),
        ];
        let stats = compute_culture_stats(&treatments);
        let products: Vec<&str> = stats[0].products_used.iter().map(String::as_str).collect();
        assert_eq!(products, vec!["Score", "Horus"]);
    }

    #[test]
    fn stats_are_permutation_invariant() {
        let mut treatments = apple_history();
        treatments.push(
            Treatment::new(4, Culture::Apple, 1.0)
                .tank_mix()
                .completed_on(date(2024, 4, 2))
                .with_product(fungicide("Score"))
                .with_product(Product::new("Karate", ProductType::Insecticide)),
        );
        treatments.push(
            Treatment::new(5, Culture::Potato, 1.0).with_product(fungicide("Ridomil")),
        );

        let forward = compute_culture_stats(&treatments);
        treatments.reverse();
        let backward = compute_culture_stats(&treatments);

        assert_eq!(forward.len(), backward.len());
        for a in &forward {
            let b = backward.iter().find(|s| s.culture == a.culture).unwrap();
            assert_eq!(a.total_treatments, b.total_treatments);
            assert_eq!(a.completed_treatments, b.completed_treatments);
            assert_eq!(a.planned_treatments, b.planned_treatments);
            assert_eq!(a.last_treatment, b.last_treatment);
            assert_eq!(a.tank_mix_count, b.tank_mix_count);
            // IndexSet equality ignores order
            assert_eq!(a.products_used, b.products_used);
            assert_eq!(a.tank_mix_types, b.tank_mix_types);
        }
    }

    #[test]
    fn timeline_sorted_and_filtered() {
        let mut treatments = apple_history();
        treatments.push(
            Treatment::new(4, Culture::Pear, 1.0)
                .with_due_date(date(2024, 1, 1))
                .with_product(fungicide("Score")),
        );

        let timeline = build_timeline(&treatments, Culture::Apple);
        let ids: Vec<i64> = timeline.treatments.iter().map(|e| e.treatment_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(timeline
            .treatments
            .windows(2)
            .all(|w| w[0].date <= w[1].date));

        let planned = &timeline.treatments[2];
        assert!(!planned.completed);
        assert_eq!(planned.date, date(2024, 6, 1));
        assert_eq!(planned.kind, EventKind::Product(ProductType::Fungicide));
        assert_eq!(planned.tank_mix_types, None);
    }

    #[test]
    fn tank_mix_event_keeps_all_types_in_product_order() {
        let mut untyped = Product::new("Mystery", ProductType::Adjuvant);
        untyped.product_type = None;
        let treatment = Treatment::new(1, Culture::Cherry, 1.0)
            .tank_mix()
            .with_due_date(date(2024, 5, 5))
            .with_product(fungicide("Score"))
            .with_product(untyped)
            .with_product(fungicide("Horus"))
            .with_product(Product::new("Karate", ProductType::Insecticide));

        let timeline = build_timeline(&[treatment], Culture::Cherry);
        let event = &timeline.treatments[0];
        assert_eq!(event.kind, EventKind::TankMix);
        assert_eq!(event.products, vec!["Score", "Mystery", "Horus", "Karate"]);
        assert_eq!(
            event.tank_mix_types,
            Some(vec![
                ProductType::Fungicide,
                ProductType::Fungicide,
                ProductType::Insecticide
            ])
        );
    }

    #[test]
    fn treatment_without_products_falls_back_to_fertilizer() {
        let treatment = Treatment::new(1, Culture::Wheat, 1.0).with_due_date(date(2024, 4, 4));
        let timeline = build_timeline(&[treatment], Culture::Wheat);
        assert_eq!(
            timeline.treatments[0].kind,
            EventKind::Product(FALLBACK_EVENT_TYPE)
        );
    }

    #[test]
    fn inconsistent_dates_contribute_zero_or_one_event() {
        // completed but only a due date: nothing to plot
        let mut done_no_actual = Treatment::new(1, Culture::Peach, 1.0)
            .with_due_date(date(2024, 2, 2))
            .with_product(fungicide("Score"));
        done_no_actual.completed = true;

        // planned with a stray actual date: only the planned point
        let mut planned_with_actual = Treatment::new(2, Culture::Peach, 1.0)
            .with_due_date(date(2024, 3, 3))
            .with_product(fungicide("Score"));
        planned_with_actual.actual_date = Some(date(2024, 3, 1));

        // completed with both dates: only the completed point
        let both = Treatment::new(3, Culture::Peach, 1.0)
            .with_due_date(date(2024, 4, 1))
            .completed_on(date(2024, 4, 4))
            .with_product(fungicide("Score"));

        let timeline = build_timeline(
            &[done_no_actual, planned_with_actual, both],
            Culture::Peach,
        );
        let points: Vec<(i64, NaiveDate, bool)> = timeline
            .treatments
            .iter()
            .map(|e| (e.treatment_id, e.date, e.completed))
            .collect();
        assert_eq!(
            points,
            vec![(2, date(2024, 3, 3), false), (3, date(2024, 4, 4), true)]
        );
    }

    #[test]
    fn aggregator_delegates() {
        let agg = AnalyticsAggregator;
        let history = apple_history();
        assert_eq!(agg.culture_stats(&history), compute_culture_stats(&history));
        assert_eq!(
            agg.timeline(&history, Culture::Apple),
            build_timeline(&history, Culture::Apple)
        );
    }
}
