//! Shared domain enums

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// Collections exposed by the admin panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Books,
    Orders,
    Readers,
    Interests,
    ActivityLogs,
    Categories,
    Languages,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Books,
        EntityKind::Orders,
        EntityKind::Readers,
        EntityKind::Interests,
        EntityKind::ActivityLogs,
        EntityKind::Categories,
        EntityKind::Languages,
    ];

    /// Path segment under `/api/`
    pub fn path(&self) -> &'static str {
        match self {
            EntityKind::Books => "books",
            EntityKind::Orders => "orders",
            EntityKind::Readers => "readers",
            EntityKind::Interests => "interests",
            EntityKind::ActivityLogs => "activity-logs",
            EntityKind::Categories => "categories",
            EntityKind::Languages => "languages",
        }
    }

    /// Envelope field holding the records
    pub fn items_field(&self) -> &'static str {
        match self {
            EntityKind::ActivityLogs => "logs",
            other => other.path(),
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

// ---------------------------------------------------------------------------
// OrderStatus
// ---------------------------------------------------------------------------

/// Book order processing status
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
    /// Status the client does not know about yet
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Other(s) => s,
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "pending" => OrderStatus::Pending,
            "confirmed" => OrderStatus::Confirmed,
            "shipped" => OrderStatus::Shipped,
            "delivered" => OrderStatus::Delivered,
            "cancelled" | "canceled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(s.to_string()),
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(OrderStatus::from(s.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

/// Lending availability of a book, as used by the books filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Borrowed,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::Borrowed => "borrowed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_field() {
        assert_eq!(EntityKind::Books.items_field(), "books");
        assert_eq!(EntityKind::ActivityLogs.items_field(), "logs");
        assert_eq!(EntityKind::ActivityLogs.path(), "activity-logs");
    }

    #[test]
    fn test_order_status_round_trip() {
        let status: OrderStatus = serde_json::from_str("\"Shipped\"").unwrap();
        assert_eq!(status, OrderStatus::Shipped);

        let status: OrderStatus = serde_json::from_str("\"on-hold\"").unwrap();
        assert_eq!(status, OrderStatus::Other("on-hold".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"on-hold\"");
    }
}
