//! GraphQL request envelope for the rangers deck lookup.

use serde::{Deserialize, Serialize};

/// Operation name sent with every deck lookup.
pub const GET_DECK_OPERATION: &str = "getDeck";

/// The `getDeck` document, including the fragments it spreads.
pub const GET_DECK_QUERY: &str = r#"query getDeck($deckId: Int!) {
  deck: rangers_deck_by_pk(id: $deckId) {
    ...DeckDetail
    __typename
  }
}

fragment DeckDetail on rangers_deck {
  ...Deck
  copy_count
  comment_count
  like_count
  liked_by_user
  original_deck {
    deck {
      id
      name
      user {
        id
        handle
        __typename
      }
      __typename
    }
    __typename
  }
  campaign {
    id
    name
    rewards
    latest_decks {
      deck {
        id
        slots
        __typename
      }
      __typename
    }
    __typename
  }
  user {
    handle
    __typename
  }
  comments(order_by: {created_at: asc}, limit: 5) {
    ...BasicDeckComment
    __typename
  }
  __typename
}

fragment Deck on rangers_deck {
  id
  user_id
  slots
  side_slots
  extra_slots
  version
  name
  description
  awa
  spi
  fit
  foc
  created_at
  updated_at
  meta
  user {
    ...UserInfo
    __typename
  }
  published
  previous_deck {
    id
    meta
    slots
    side_slots
    version
    __typename
  }
  next_deck {
    id
    meta
    slots
    side_slots
    version
    __typename
  }
  __typename
}

fragment UserInfo on rangers_users {
  id
  handle
  __typename
}

fragment BasicDeckComment on rangers_comment {
  id
  user {
    ...UserInfo
    __typename
  }
  text
  created_at
  updated_at
  response_count
  comment_id
  __typename
}"#;

/// Variables for the `getDeck` operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeckVariables {
    pub deck_id: i64,
}

/// Request body posted to the GraphQL endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RangersQuery {
    pub operation_name: String,
    pub variables: DeckVariables,
    pub query: String,
}

impl RangersQuery {
    /// Build the `getDeck` request for one deck.
    pub fn get_deck(deck_id: i64) -> Self {
        Self {
            operation_name: GET_DECK_OPERATION.to_string(),
            variables: DeckVariables { deck_id },
            query: GET_DECK_QUERY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let value = serde_json::to_value(RangersQuery::get_deck(42)).unwrap();
        assert_eq!(value["operationName"], "getDeck");
        assert_eq!(value["variables"]["deckId"], 42);
        assert_eq!(value["query"], GET_DECK_QUERY);
        assert_eq!(value.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_query_declares_spread_fragments() {
        assert!(GET_DECK_QUERY.starts_with("query getDeck($deckId: Int!)"));
        for fragment in ["DeckDetail", "Deck", "UserInfo", "BasicDeckComment"] {
            assert!(GET_DECK_QUERY.contains(&format!("fragment {fragment} on ")));
        }
        assert!(!GET_DECK_QUERY.ends_with('\n'));
    }
}
