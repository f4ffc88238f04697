//! Sharing a created request
//!
//! Builds the share link and message, then tries the WhatsApp deep links in
//! order. When none opens, the message goes to the clipboard instead.

use tracing::{debug, warn};
use url::Url;

use crate::config::Settings;
use crate::error::{BuzzPayError, BuzzPayResult};
use crate::models::{phone, PaymentRequest, RequestId};

/// Something that can open a URL (browser, OS handler)
pub trait ShareTarget {
    fn open(&self, url: &str) -> BuzzPayResult<()>;
}

/// Something that can hold text for the user to paste
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> BuzzPayResult<()>;
}

/// Opens URLs with the operating system's default handler
#[derive(Debug, Default)]
pub struct SystemShareTarget;

impl ShareTarget for SystemShareTarget {
    fn open(&self, url: &str) -> BuzzPayResult<()> {
        open::that(url).map_err(|e| BuzzPayError::ShareTargetUnavailable(e.to_string()))
    }
}

/// The system clipboard
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> BuzzPayResult<()> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| BuzzPayError::ShareTargetUnavailable(format!("clipboard: {}", e)))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| BuzzPayError::ShareTargetUnavailable(format!("clipboard: {}", e)))
    }
}

/// What happened when sharing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// A deep link opened
    Opened { url: String },
    /// Nothing opened; the message is on the clipboard
    Copied { notice: String },
}

/// Public link to a request
pub fn share_link(host: &str, id: &RequestId) -> String {
    format!("https://{}/request/{}", host, id)
}

pub struct ShareService {
    host: String,
    currency_symbol: String,
}

impl ShareService {
    pub fn new(host: impl Into<String>, currency_symbol: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.share_host.clone(), settings.currency_symbol.clone())
    }

    pub fn link(&self, request: &PaymentRequest) -> String {
        share_link(&self.host, &request.id)
    }

    /// The message sent to the recipient
    pub fn message(&self, request: &PaymentRequest) -> String {
        let mut lines = vec![
            "Payment Request from BuzzPay".to_string(),
            format!(
                "Sender: {} ({})",
                request.sender,
                phone::display(&request.sender_phone)
            ),
            format!("Recipient: {}", request.recipient),
            format!(
                "Amount: {}",
                request.amount.format_with_symbol(&self.currency_symbol)
            ),
        ];
        if !request.description.trim().is_empty() {
            lines.push(format!("Description: {}", request.description));
        }
        lines.push(format!("Pay here: {}", self.link(request)));
        lines.join("\n")
    }

    /// WhatsApp deep links, most compatible first
    pub fn deep_links(&self, request: &PaymentRequest) -> BuzzPayResult<Vec<String>> {
        let message = self.message(request);
        let recipient = phone::digits_only(&request.recipient_phone);
        let invalid = |e: url::ParseError| BuzzPayError::Config(format!("Bad share URL: {}", e));

        let web = Url::parse_with_params(
            &format!("https://wa.me/{}", recipient),
            &[("text", message.as_str())],
        )
        .map_err(invalid)?;

        let app = if recipient.is_empty() {
            Url::parse_with_params("whatsapp://send", &[("text", message.as_str())])
        } else {
            Url::parse_with_params(
                "whatsapp://send",
                &[("phone", recipient.as_str()), ("text", message.as_str())],
            )
        }
        .map_err(invalid)?;

        Ok(vec![web.into(), app.into()])
    }

    /// Open the first deep link that works, else copy the message
    pub fn share(
        &self,
        request: &PaymentRequest,
        target: &dyn ShareTarget,
        clipboard: &mut dyn Clipboard,
    ) -> BuzzPayResult<ShareOutcome> {
        for url in self.deep_links(request)? {
            match target.open(&url) {
                Ok(()) => {
                    debug!(id = %request.id, "opened share link");
                    return Ok(ShareOutcome::Opened { url });
                }
                Err(e) => warn!(error = %e, "failed to open share link"),
            }
        }

        clipboard.copy(&self.message(request)).map_err(|e| {
            BuzzPayError::ShareTargetUnavailable(format!(
                "could not open WhatsApp or copy the message ({})",
                e
            ))
        })?;

        warn!(id = %request.id, "share fell back to clipboard");
        Ok(ShareOutcome::Copied {
            notice: "Could not open WhatsApp. Message copied to clipboard. \
                     Please paste it in WhatsApp manually."
                .to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, RequestStatus};
    use chrono::Utc;
    use std::cell::RefCell;

    fn request(description: &str) -> PaymentRequest {
        PaymentRequest {
            id: RequestId::new("7f1c2d"),
            amount: Money::from_cents(2550),
            description: description.into(),
            recipient: "Bob".into(),
            sender: "Al".into(),
            sender_phone: "15551234567".into(),
            recipient_phone: "15557654321".into(),
            status: RequestStatus::Pending,
            created_at: Utc::now(),
            payment_method: None,
            payment_date: None,
            note: None,
        }
    }

    struct FakeTarget {
        fail_first: usize,
        opened: RefCell<Vec<String>>,
    }

    impl ShareTarget for FakeTarget {
        fn open(&self, url: &str) -> BuzzPayResult<()> {
            let mut opened = self.opened.borrow_mut();
            opened.push(url.to_string());
            if opened.len() <= self.fail_first {
                Err(BuzzPayError::ShareTargetUnavailable("no handler".into()))
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default)]
    struct FakeClipboard {
        contents: Option<String>,
        broken: bool,
    }

    impl Clipboard for FakeClipboard {
        fn copy(&mut self, text: &str) -> BuzzPayResult<()> {
            if self.broken {
                return Err(BuzzPayError::ShareTargetUnavailable("no display".into()));
            }
            self.contents = Some(text.to_string());
            Ok(())
        }
    }

    fn service() -> ShareService {
        ShareService::new("buzzpay.co", "$")
    }

    #[test]
    fn test_message_lines() {
        let message = service().message(&request("Dinner"));
        assert_eq!(
            message,
            "Payment Request from BuzzPay\n\
             Sender: Al (+15551234567)\n\
             Recipient: Bob\n\
             Amount: $25.50\n\
             Description: Dinner\n\
             Pay here: https://buzzpay.co/request/7f1c2d"
        );
    }

    #[test]
    fn test_empty_description_line_omitted() {
        let message = service().message(&request(""));
        assert!(!message.contains("Description"));
        assert!(message.ends_with("Pay here: https://buzzpay.co/request/7f1c2d"));
    }

    #[test]
    fn test_deep_links() {
        let links = service().deep_links(&request("Dinner")).unwrap();
        assert_eq!(links.len(), 2);
        assert!(links[0].starts_with("https://wa.me/15557654321?text="));
        assert!(links[1].starts_with("whatsapp://send?phone=15557654321&text="));

        let parsed = Url::parse(&links[0]).unwrap();
        let (_, text) = parsed.query_pairs().next().unwrap();
        assert_eq!(text, service().message(&request("Dinner")));
    }

    #[test]
    fn test_share_opens_first_link() {
        let target = FakeTarget {
            fail_first: 0,
            opened: RefCell::new(Vec::new()),
        };
        let mut clipboard = FakeClipboard::default();

        let outcome = service()
            .share(&request("Dinner"), &target, &mut clipboard)
            .unwrap();
        assert!(matches!(outcome, ShareOutcome::Opened { ref url } if url.starts_with("https://wa.me/")));
        assert!(clipboard.contents.is_none());
    }

    #[test]
    fn test_share_falls_back_to_app_link() {
        let target = FakeTarget {
            fail_first: 1,
            opened: RefCell::new(Vec::new()),
        };
        let mut clipboard = FakeClipboard::default();

        let outcome = service()
            .share(&request("Dinner"), &target, &mut clipboard)
            .unwrap();
        assert!(matches!(outcome, ShareOutcome::Opened { ref url } if url.starts_with("whatsapp://")));
    }

    #[test]
    fn test_share_falls_back_to_clipboard() {
        let target = FakeTarget {
            fail_first: 2,
            opened: RefCell::new(Vec::new()),
        };
        let mut clipboard = FakeClipboard::default();

        let outcome = service()
            .share(&request("Dinner"), &target, &mut clipboard)
            .unwrap();
        assert!(matches!(outcome, ShareOutcome::Copied { .. }));
        assert!(clipboard.contents.unwrap().contains("Amount: $25.50"));
    }

    #[test]
    fn test_share_fails_without_clipboard() {
        let target = FakeTarget {
            fail_first: 2,
            opened: RefCell::new(Vec::new()),
        };
        let mut clipboard = FakeClipboard {
            broken: true,
            ..FakeClipboard::default()
        };

        let err = service()
            .share(&request("Dinner"), &target, &mut clipboard)
            .unwrap_err();
        assert!(matches!(err, BuzzPayError::ShareTargetUnavailable(_)));
    }
}
