//! Book draft validation
//!
//! Rules run in a fixed order and the first failure wins, so the same
//! draft always yields the same message.

use crate::domain::ValidationError;
use crate::models::{BookDraft, BookPayload, FormField};

pub const MSG_TITLE: &str = "enter a title";
pub const MSG_AUTHOR: &str = "enter an author";
pub const MSG_ISBN_MISSING: &str = "enter an ISBN";
pub const MSG_ISBN_LENGTH: &str = "ISBN must be 10 or 13 digits";
pub const MSG_PRICE: &str = "enter a non-negative integer price";
pub const MSG_PUBLISH_DATE: &str = "select a publish date";

/// Strip hyphens and whitespace from an ISBN
pub fn normalize_isbn(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect()
}

fn invalid(field: FormField, message: &'static str) -> ValidationError {
    ValidationError { field, message }
}

/// Validate a draft and build the wire payload from it.
///
/// The payload carries the normalized ISBN; callers must send it rather
/// than the draft's original text.
pub fn validate_book(draft: &BookDraft) -> Result<BookPayload, ValidationError> {
    if draft.title.is_empty() {
        return Err(invalid(FormField::Title, MSG_TITLE));
    }
    if draft.author.is_empty() {
        return Err(invalid(FormField::Author, MSG_AUTHOR));
    }

    let isbn = normalize_isbn(&draft.isbn);
    if isbn.is_empty() {
        return Err(invalid(FormField::Isbn, MSG_ISBN_MISSING));
    }
    if !(isbn.len() == 10 || isbn.len() == 13) || !isbn.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(FormField::Isbn, MSG_ISBN_LENGTH));
    }

    // Digits only: rejects "-5" and "12.5" alike
    if draft.price.is_empty() || !draft.price.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(FormField::Price, MSG_PRICE));
    }
    let price: u64 = draft
        .price
        .parse()
        .map_err(|_| invalid(FormField::Price, MSG_PRICE))?;

    if draft.publish_date.is_empty() {
        return Err(invalid(FormField::PublishDate, MSG_PUBLISH_DATE));
    }

    Ok(BookPayload {
        title: draft.title.clone(),
        author: draft.author.clone(),
        isbn,
        price,
        publish_date: draft.publish_date.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> BookDraft {
        BookDraft::collect(
            "Effective Java",
            "Joshua Bloch",
            "978-0-13-468599-1",
            "45000",
            "2018-01-06",
        )
    }

    fn reject(draft: BookDraft) -> ValidationError {
        validate_book(&draft).expect_err("draft should be rejected")
    }

    #[test]
    fn test_valid_draft_normalizes_isbn() {
        let payload = validate_book(&valid_draft()).expect("draft should be valid");
        assert_eq!(payload.isbn, "9780134685991");
        assert_eq!(payload.price, 45000);
        assert_eq!(payload.title, "Effective Java");
    }

    #[test]
    fn test_isbn10_with_spaces_is_accepted() {
        let draft = BookDraft {
            isbn: "0 306 40615 2".to_string(),
            ..valid_draft()
        };
        assert_eq!(validate_book(&draft).unwrap().isbn, "0306406152");
    }

    #[test]
    fn test_missing_fields_report_specific_messages() {
        let cases = [
            (FormField::Title, MSG_TITLE),
            (FormField::Author, MSG_AUTHOR),
            (FormField::Isbn, MSG_ISBN_MISSING),
            (FormField::PublishDate, MSG_PUBLISH_DATE),
        ];

        for (field, message) in cases {
            let mut draft = valid_draft();
            match field {
                FormField::Title => draft.title.clear(),
                FormField::Author => draft.author.clear(),
                FormField::Isbn => draft.isbn.clear(),
                FormField::PublishDate => draft.publish_date.clear(),
                FormField::Price => unreachable!(),
            }
            let err = reject(draft);
            assert_eq!(err.field, field);
            assert_eq!(err.message, message);
        }
    }

    #[test]
    fn test_isbn_of_only_hyphens_counts_as_missing() {
        let err = reject(BookDraft {
            isbn: "- -".to_string(),
            ..valid_draft()
        });
        assert_eq!(err.message, MSG_ISBN_MISSING);
    }

    #[test]
    fn test_isbn_wrong_length_or_letters() {
        for isbn in ["12345", "123456789012", "123456789X", "97801346859912"] {
            let err = reject(BookDraft {
                isbn: isbn.to_string(),
                ..valid_draft()
            });
            assert_eq!(err.message, MSG_ISBN_LENGTH, "isbn {isbn}");
        }
    }

    #[test]
    fn test_price_must_be_non_negative_integer() {
        for price in ["-5", "12.5", "", "1e3", "99999999999999999999999"] {
            let err = reject(BookDraft {
                price: price.to_string(),
                ..valid_draft()
            });
            assert_eq!(err.field, FormField::Price, "price {price:?}");
            assert_eq!(err.message, MSG_PRICE);
        }

        let payload = validate_book(&BookDraft {
            price: "0".to_string(),
            ..valid_draft()
        })
        .unwrap();
        assert_eq!(payload.price, 0);
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let err = reject(BookDraft::default());
        assert_eq!(err.message, MSG_TITLE);

        let err = reject(BookDraft {
            isbn: "12345".to_string(),
            price: "-1".to_string(),
            publish_date: String::new(),
            ..valid_draft()
        });
        assert_eq!(err.message, MSG_ISBN_LENGTH);
    }
}
