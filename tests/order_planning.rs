//! Integration tests for order validation and planning against a stock snapshot.
//!
//! Planning is the pure half of placement: if it fails, nothing is written. These tests drive
//! it through the public API the way the orders service does.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use testresult::TestResult;

use shopfront::prelude::*;

const SHIRT: u32 = 1;
const JACKET: u32 = 2;

fn snapshot() -> FxHashMap<u32, StockedProduct> {
    let mut products = FxHashMap::default();

    products.insert(
        SHIRT,
        StockedProduct {
            base_price: Decimal::from(100),
            stock: 50,
            tiers: vec![PricingTier::new(10, Decimal::from(90))],
        },
    );
    products.insert(
        JACKET,
        StockedProduct {
            base_price: Decimal::new(349_900, 2),
            stock: 2,
            tiers: Vec::new(),
        },
    );

    products
}

fn line(product: u32, quantity: i64, price: Decimal) -> RequestedLine<u32> {
    RequestedLine {
        product,
        quantity,
        price_at_purchase: price,
    }
}

#[test]
fn test_plan_totals_every_line() -> TestResult {
    let lines = validate(
        true,
        &[
            line(SHIRT, 10, Decimal::from(90)),
            line(JACKET, 2, Decimal::new(349_900, 2)),
        ],
    )?;

    let plan = plan(&lines, &snapshot(), PriceCheck::Trust)?;

    assert_eq!(plan.total_amount(), Decimal::new(789_800, 2));
    assert_eq!(plan.demand(), &[(SHIRT, 10), (JACKET, 2)]);

    Ok(())
}

#[test]
fn test_one_short_line_fails_the_whole_order() -> TestResult {
    let lines = validate(
        true,
        &[
            line(SHIRT, 1, Decimal::from(100)),
            line(JACKET, 3, Decimal::new(349_900, 2)),
        ],
    )?;

    let result = plan(&lines, &snapshot(), PriceCheck::Trust);

    assert_eq!(
        result,
        Err(PlacementError::InsufficientStock {
            product: JACKET,
            requested: 3,
            available: 2,
        })
    );

    Ok(())
}

#[test]
fn test_repeated_lines_share_one_stock_check() -> TestResult {
    let lines = validate(
        true,
        &[
            line(JACKET, 1, Decimal::new(349_900, 2)),
            line(JACKET, 2, Decimal::new(349_900, 2)),
        ],
    )?;

    let result = plan(&lines, &snapshot(), PriceCheck::Trust);

    assert!(
        matches!(
            result,
            Err(PlacementError::InsufficientStock { requested: 3, .. })
        ),
        "expected summed demand to exceed stock, got {result:?}"
    );

    Ok(())
}

#[test]
fn test_missing_product_is_reported_before_stock() -> TestResult {
    let lines = validate(
        true,
        &[line(JACKET, 5, Decimal::ONE), line(99, 1, Decimal::ONE)],
    )?;

    assert_eq!(
        plan(&lines, &snapshot(), PriceCheck::Trust),
        Err(PlacementError::ProductNotFound { product: 99 })
    );

    Ok(())
}

#[test]
fn test_validation_rejects_bad_requests_before_planning() {
    assert_eq!(
        validate::<u32>(false, &[line(SHIRT, 1, Decimal::ONE)]),
        Err(ValidationError::MissingBuyer)
    );
    assert_eq!(validate::<u32>(true, &[]), Err(ValidationError::NoItems));
    assert_eq!(
        validate(true, &[line(SHIRT, 0, Decimal::ONE)]),
        Err(ValidationError::NonPositiveQuantity {
            product: SHIRT,
            quantity: 0,
        })
    );
    assert_eq!(
        validate(true, &[line(SHIRT, 1, Decimal::NEGATIVE_ONE)]),
        Err(ValidationError::NegativePrice {
            product: SHIRT,
            price: Decimal::NEGATIVE_ONE,
        })
    );
}

#[test]
fn test_price_checks_against_resolved_tier_price() -> TestResult {
    let lines = validate(true, &[line(SHIRT, 10, Decimal::from(50))])?;

    let rejected = plan(
        &lines,
        &snapshot(),
        PriceCheck::Reject {
            tolerance: Decimal::new(1, 2),
        },
    );

    assert_eq!(
        rejected,
        Err(PlacementError::PriceMismatch {
            product: SHIRT,
            submitted: Decimal::from(50),
            expected: Decimal::from(90),
        })
    );

    let clamped = plan(
        &lines,
        &snapshot(),
        PriceCheck::Clamp {
            tolerance: Decimal::new(1, 2),
        },
    )?;

    assert_eq!(clamped.total_amount(), Decimal::from(900));

    Ok(())
}
