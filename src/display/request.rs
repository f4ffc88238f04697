//! Payment request display formatting
//!
//! Formats requests for terminal output: the sender's list, full details,
//! the recipient's payment view and the receipt.

use crate::models::{phone, PaymentMethod, PaymentRequest};

/// Format a list of requests as a table
pub fn format_request_list(requests: &[PaymentRequest], currency: &str) -> String {
    if requests.is_empty() {
        return "No payment requests found.\n".to_string();
    }

    let recipient_width = requests
        .iter()
        .map(|r| r.recipient.chars().count())
        .max()
        .unwrap_or(9)
        .max(9);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8}  {:<10}  {:<recipient_width$}  {:>12}  {:<10}  {}\n",
        "ID",
        "Created",
        "Recipient",
        "Amount",
        "Status",
        "Description",
        recipient_width = recipient_width,
    ));
    output.push_str(&format!(
        "{:-<8}  {:-<10}  {:-<recipient_width$}  {:->12}  {:-<10}  {:-<11}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        recipient_width = recipient_width,
    ));

    for request in requests {
        output.push_str(&format!(
            "{:<8}  {:<10}  {:<recipient_width$}  {:>12}  {:<10}  {}\n",
            request.id.short(),
            request.created_at.format("%Y-%m-%d").to_string(),
            request.recipient,
            request.amount.format_with_symbol(currency),
            request.status.to_string(),
            request.description,
            recipient_width = recipient_width,
        ));
    }

    output
}

/// Format every field of a request
pub fn format_request_details(request: &PaymentRequest, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Request:     {}\n", request.id));
    output.push_str(&format!("Status:      {}\n", request.status));
    output.push_str(&format!(
        "Amount:      {}\n",
        request.amount.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "From:        {} ({})\n",
        request.sender,
        phone::display(&request.sender_phone)
    ));
    output.push_str(&format!(
        "To:          {} ({})\n",
        request.recipient,
        phone::display(&request.recipient_phone)
    ));
    if !request.description.is_empty() {
        output.push_str(&format!("Description: {}\n", request.description));
    }
    output.push_str(&format!(
        "Created:     {}\n",
        request.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    if let Some(method) = &request.payment_method {
        output.push_str(&format!("Method:      {}\n", method.display_name()));
    }
    if let Some(date) = request.payment_date {
        output.push_str(&format!("Paid:        {}\n", date.format("%Y-%m-%d %H:%M UTC")));
    }
    if let Some(note) = &request.note {
        output.push_str(&format!("Note:        {}\n", note));
    }

    output
}

/// What a verified recipient sees before paying
pub fn format_payment_details(request: &PaymentRequest, currency: &str) -> String {
    let mut output = String::new();

    output.push_str("Payment Details\n");
    output.push_str(&format!(
        "  Amount:      {}\n",
        request.amount.format_with_symbol(currency)
    ));
    output.push_str(&format!("  From:        {}\n", request.sender));
    if !request.description.is_empty() {
        output.push_str(&format!("  Description: {}\n", request.description));
    }
    output.push_str("\nPay with:\n");
    for method in PaymentMethod::ALL {
        output.push_str(&format!("  {:<7} {}\n", method.id(), method.display_name()));
    }

    output
}

/// Receipt for a paid request
pub fn format_receipt(request: &PaymentRequest, currency: &str) -> String {
    let mut output = String::new();

    let title = if request.is_paid() {
        "Payment Successful"
    } else {
        "Payment Not Completed"
    };
    output.push_str(&format!("{}\n", title));
    output.push_str(&format!("{:-<1$}\n", "", title.len()));
    output.push_str(&format!(
        "Amount Paid:    {}\n",
        request.amount.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "Payment Method: {}\n",
        request
            .payment_method
            .as_ref()
            .map(|m| m.display_name())
            .unwrap_or("-")
    ));
    output.push_str(&format!(
        "Date:           {}\n",
        request
            .payment_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string())
    ));
    output.push_str(&format!("Transaction ID: {}\n", request.id));
    if let Some(note) = &request.note {
        output.push_str(&format!("Note:           {}\n", note));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, RequestId, RequestStatus};
    use chrono::{TimeZone, Utc};

    fn request() -> PaymentRequest {
        PaymentRequest {
            id: RequestId::new("550e8400-e29b-41d4-a716-446655440000"),
            amount: Money::from_cents(2550),
            description: "Dinner".into(),
            recipient: "Bob".into(),
            sender: "Al".into(),
            sender_phone: "15551234567".into(),
            recipient_phone: "15557654321".into(),
            status: RequestStatus::Pending,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
            payment_method: None,
            payment_date: None,
            note: None,
        }
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_request_list(&[], "$"), "No payment requests found.\n");
    }

    #[test]
    fn test_list_row() {
        let output = format_request_list(&[request()], "$");
        let row = output.lines().nth(2).unwrap();
        assert!(row.starts_with("550e8400  2024-05-01  Bob"));
        assert!(row.contains("$25.50"));
        assert!(row.contains("Pending"));
        assert!(row.ends_with("Dinner"));
    }

    #[test]
    fn test_details() {
        let mut r = request();
        r.note = Some("thanks".into());
        let output = format_request_details(&r, "$");
        assert!(output.contains("From:        Al (+15551234567)"));
        assert!(output.contains("Note:        thanks"));
        assert!(!output.contains("Method:"));
    }

    #[test]
    fn test_payment_details_lists_methods() {
        let output = format_payment_details(&request(), "$");
        assert!(output.contains("Amount:      $25.50"));
        assert!(output.contains("card    Credit Card"));
        assert!(output.contains("mobile  Mobile Money"));
        assert!(output.contains("bank    Bank Transfer"));
    }

    #[test]
    fn test_receipt() {
        let mut r = request();
        r.status = RequestStatus::Paid;
        r.payment_method = Some(PaymentMethod::Card);
        r.payment_date = Some(Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap());

        let output = format_receipt(&r, "$");
        assert!(output.starts_with("Payment Successful\n"));
        assert!(output.contains("Payment Method: Credit Card"));
        assert!(output.contains("Date:           2024-05-02"));
        assert!(output.contains("Transaction ID: 550e8400-e29b-41d4-a716-446655440000"));
    }
}
