use chrono::Utc;
use rotipang_api::format::{format_phone_number, generate_order_number};

#[test]
fn order_number_matches_the_wire_format() {
    let number = generate_order_number();

    // RP- + 8-digit date + - + 3-digit zero-padded random.
    assert_eq!(number.len(), 15);
    assert!(number.starts_with("RP-"));
    let date_part = &number[3..11];
    assert!(date_part.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(&number[11..12], "-");
    let suffix = &number[12..];
    assert_eq!(suffix.len(), 3);
    assert!(suffix.chars().all(|c| c.is_ascii_digit()));

    assert_eq!(date_part, Utc::now().format("%Y%m%d").to_string());
}

// The suffix space is only 1000 values per date, so uniqueness is best-effort
// by construction. Drawing more numbers than the space can hold proves the
// generator itself never de-duplicates; the persistence layer does not either.
#[test]
fn order_numbers_are_not_unique_by_construction() {
    let numbers: Vec<String> = (0..3000).map(|_| generate_order_number()).collect();
    let distinct: std::collections::HashSet<&String> = numbers.iter().collect();
    assert!(
        distinct.len() < numbers.len(),
        "3000 draws over at most 2000 possible values must collide"
    );
}

#[test]
fn phone_numbers_normalize_to_country_prefix() {
    assert_eq!(format_phone_number("08123456789"), "628123456789");
    assert_eq!(format_phone_number("628123456789"), "628123456789");
    assert_eq!(format_phone_number("8123456789"), "628123456789");
    assert_eq!(format_phone_number("0812-3456 789"), "628123456789");
}
