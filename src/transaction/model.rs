use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A plain value transfer waiting in the pending pool or sealed in a block.
/// No signatures: whoever submits it is trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub receiver: String,
    /// Kept exactly as submitted (integer or float) so the canonical
    /// encoding reproduces it byte for byte.
    pub amount: Number,
}

impl Transaction {
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        amount: impl Into<Number>,
    ) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            amount: amount.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Transaction;

    #[test]
    fn wire_field_names_are_stable() {
        let tx = Transaction::new("A", "B", 10u64);
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["sender"], "A");
        assert_eq!(json["receiver"], "B");
        assert_eq!(json["amount"], 10);
    }

    #[test]
    fn float_amount_survives_decoding() {
        let tx: Transaction =
            serde_json::from_str(r#"{"sender":"A","receiver":"B","amount":2.5}"#).unwrap();
        assert_eq!(tx.amount.as_f64(), Some(2.5));
        assert!(tx.amount.as_u64().is_none());
    }
}
