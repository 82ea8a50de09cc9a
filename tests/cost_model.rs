//! 견적 공식 회귀 테스트.
use slab_quote_toolbox::inventory::record::RawSlabFields;
use slab_quote_toolbox::pricing::{compute_cost, CostBreakdown, CostParameters};

fn params() -> CostParameters {
    CostParameters {
        markup_factor: 1.3,
        fabrication_cost_per_sqft: 12.0,
        install_cost_per_sqft: 8.0,
        ib_material_markup: 1.1,
    }
}

#[test]
fn reference_quote_for_twenty_square_feet() {
    let b = compute_cost(Some(50.0), 20.0, &params());
    assert!((b.material_and_fab - 1540.0).abs() < 1e-9, "{b:?}");
    assert!((b.install_cost - 160.0).abs() < 1e-9, "{b:?}");
    assert!((b.ib_cost - 1340.0).abs() < 1e-9, "{b:?}");
    assert!((b.total_customer_base - 1700.0).abs() < 1e-9, "{b:?}");
}

#[test]
fn total_is_material_plus_install_exactly() {
    let rates = [
        params(),
        CostParameters {
            markup_factor: 1.45,
            fabrication_cost_per_sqft: 17.35,
            install_cost_per_sqft: 9.99,
            ib_material_markup: 1.07,
        },
    ];
    for p in &rates {
        for unit_cost in [0.0, 3.33, 49.99, 123.456] {
            for sq_ft in [1.0, 7.5, 33.3, 120.25] {
                let b = compute_cost(Some(unit_cost), sq_ft, p);
                assert_eq!(b.total_customer_base, b.material_and_fab + b.install_cost);
            }
        }
    }
}

#[test]
fn doubling_area_doubles_every_field() {
    for unit_cost in [0.0, 12.7, 88.8] {
        for sq_ft in [1.0, 3.7, 42.42] {
            let one = compute_cost(Some(unit_cost), sq_ft, &params());
            let two = compute_cost(Some(unit_cost), sq_ft * 2.0, &params());
            assert_eq!(two.material_and_fab, one.material_and_fab * 2.0);
            assert_eq!(two.install_cost, one.install_cost * 2.0);
            assert_eq!(two.ib_cost, one.ib_cost * 2.0);
            assert_eq!(two.total_customer_base, one.total_customer_base * 2.0);
        }
    }
}

#[test]
fn missing_unit_cost_matches_zero() {
    assert_eq!(
        compute_cost(None, 25.0, &params()),
        compute_cost(Some(0.0), 25.0, &params())
    );
}

#[test]
fn non_negative_inputs_give_non_negative_fields() {
    let zero_rates = CostParameters {
        markup_factor: 0.0,
        fabrication_cost_per_sqft: 0.0,
        install_cost_per_sqft: 0.0,
        ib_material_markup: 0.0,
    };
    for p in [params(), zero_rates] {
        for unit_cost in [0.0, 0.01, 75.0] {
            let b = compute_cost(Some(unit_cost), 0.5, &p);
            assert!(b.material_and_fab >= 0.0);
            assert!(b.install_cost >= 0.0);
            assert!(b.ib_cost >= 0.0);
            assert!(b.total_customer_base >= 0.0);
        }
    }
}

#[test]
fn customer_view_omits_internal_cost() {
    let b = compute_cost(Some(50.0), 20.0, &params());
    let view = b.customer_view();
    assert_eq!(view.total_customer_base, b.total_customer_base);
    assert_eq!(view.material_and_fab, b.material_and_fab);
    // IB 원가는 고객 합계에 들어가지 않는다.
    assert!(b.total_customer_base != b.material_and_fab + b.install_cost + b.ib_cost);
}

#[test]
fn slab_with_unparseable_cost_prices_like_zero() {
    let slab = RawSlabFields {
        location: "Vernon",
        thickness: "3cm",
        color: "Calacatta",
        unit_cost: Some("call for price"),
        available_area: Some("40"),
        ..RawSlabFields::default()
    }
    .into_record();
    assert_eq!(
        CostBreakdown::for_slab(&slab, 10.0, &params()),
        compute_cost(None, 10.0, &params())
    );
}
