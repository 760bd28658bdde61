//! Order validation against card rules and restaurant menus.

use chrono::{Datelike, NaiveDate};

use crate::models::{InvalidReason, Order, OrderRecord, Restaurant};

/// Flat charge added to every order, in pence.
pub const DELIVERY_CHARGE_PENCE: u32 = 100;

/// Most items a single order may contain.
pub const MAX_ORDER_ITEMS: usize = 5;

/// Validate a raw order and resolve its restaurant.
///
/// Checks run in a fixed order and the first failure decides the reason:
/// item count, CVV, card expiry, card number, menu match, then total.
pub fn validate_order(record: &OrderRecord, restaurants: &[Restaurant]) -> Order {
    let invalid = |reason| {
        Order::invalid(
            record.order_no.clone(),
            record.order_items.clone(),
            record.price_total_in_pence,
            reason,
        )
    };

    if record.order_items.is_empty() || record.order_items.len() > MAX_ORDER_ITEMS {
        return invalid(InvalidReason::PizzaCount);
    }
    if !is_cvv_valid(&record.cvv) {
        return invalid(InvalidReason::Cvv);
    }
    if !is_expiry_valid(&record.credit_card_expiry, record.order_date) {
        return invalid(InvalidReason::ExpiryDate);
    }
    if !is_card_number_valid(&record.credit_card_number) {
        return invalid(InvalidReason::CardNumber);
    }

    let restaurant = match find_supplier(&record.order_items, restaurants) {
        Ok(restaurant) => restaurant,
        Err(reason) => return invalid(reason),
    };

    let expected_total = record
        .order_items
        .iter()
        .filter_map(|item| restaurant.price_of(item))
        .try_fold(DELIVERY_CHARGE_PENCE, |total, price| total.checked_add(price));
    if expected_total != Some(record.price_total_in_pence) {
        return invalid(InvalidReason::Total);
    }

    Order::valid(
        record.order_no.clone(),
        record.order_items.clone(),
        record.price_total_in_pence,
        restaurant.reference(),
    )
}

/// Validate a whole day's orders, keeping input order.
pub fn validate_orders(records: &[OrderRecord], restaurants: &[Restaurant]) -> Vec<Order> {
    records
        .iter()
        .map(|record| validate_order(record, restaurants))
        .collect()
}

/// Exactly three ASCII digits.
pub fn is_cvv_valid(cvv: &str) -> bool {
    cvv.len() == 3 && cvv.bytes().all(|b| b.is_ascii_digit())
}

/// `MM/YY`, with the card still valid on the order date. Cards expire at the
/// end of their expiry month.
pub fn is_expiry_valid(expiry: &str, order_date: NaiveDate) -> bool {
    let Some((month, year)) = parse_expiry(expiry) else {
        return false;
    };
    match last_day_of_month(2000 + year, month) {
        Some(expires_on) => order_date <= expires_on,
        None => false,
    }
}

/// Sixteen ASCII digits passing the Luhn checksum.
pub fn is_card_number_valid(number: &str) -> bool {
    if number.len() != 16 || !number.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let sum: u32 = number
        .bytes()
        .map(|b| (b - b'0') as u32)
        .enumerate()
        .map(|(i, digit)| {
            // Sixteen digits, so doubling every even index from the left
            // matches doubling every second digit from the right.
            if i % 2 == 0 {
                let doubled = digit * 2;
                doubled / 10 + doubled % 10
            } else {
                digit
            }
        })
        .sum();
    sum % 10 == 0
}

fn parse_expiry(expiry: &str) -> Option<(u32, i32)> {
    let bytes = expiry.as_bytes();
    if bytes.len() != 5 || bytes[2] != b'/' {
        return None;
    }
    let (month, year) = (&expiry[..2], &expiry[3..]);
    if !month.bytes().chain(year.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    (1..=12).contains(&month).then_some((month, year))
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    first_of_next.pred_opt().filter(|day| day.month() == month)
}

/// The single restaurant that sells every item.
fn find_supplier<'r>(
    items: &[String],
    restaurants: &'r [Restaurant],
) -> Result<&'r Restaurant, InvalidReason> {
    if let Some(restaurant) = restaurants
        .iter()
        .find(|r| items.iter().all(|item| r.sells(item)))
    {
        return Ok(restaurant);
    }

    let all_known = items
        .iter()
        .all(|item| restaurants.iter().any(|r| r.sells(item)));
    if all_known {
        Err(InvalidReason::PizzaCountMultipleSuppliers)
    } else {
        Err(InvalidReason::PizzaNotDefined)
    }
}
