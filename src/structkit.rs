use crate::utils::error::{KitError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Overwrite the fields of `dst` with the same-named fields of `src`.
/// Fields only one side has are left alone.
pub fn copy_struct<S, D>(src: &S, dst: &mut D) -> Result<()>
where
    S: Serialize,
    D: Serialize + DeserializeOwned,
{
    let Value::Object(source) = serde_json::to_value(src)? else {
        return Err(KitError::invalid_argument("copy_struct source must serialize to a map"));
    };
    let Value::Object(mut target) = serde_json::to_value(&*dst)? else {
        return Err(KitError::invalid_argument("copy_struct target must serialize to a map"));
    };

    for (field, value) in source {
        if let Some(slot) = target.get_mut(&field) {
            *slot = value;
        }
    }
    *dst = serde_json::from_value(Value::Object(target))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize)]
    struct OrderRow {
        id: u64,
        buyer: String,
        internal_note: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct OrderView {
        id: u64,
        buyer: String,
        shown: bool,
    }

    #[test]
    fn test_copy_struct_copies_shared_fields() {
        let row = OrderRow {
            id: 42,
            buyer: "li".to_string(),
            internal_note: "vip".to_string(),
        };
        let mut view = OrderView {
            shown: true,
            ..OrderView::default()
        };
        copy_struct(&row, &mut view).unwrap();
        assert_eq!(
            view,
            OrderView {
                id: 42,
                buyer: "li".to_string(),
                shown: true
            }
        );
    }

    #[test]
    fn test_copy_struct_type_mismatch() {
        #[derive(Serialize)]
        struct Wrong {
            id: &'static str,
        }
        let mut view = OrderView::default();
        assert!(copy_struct(&Wrong { id: "x" }, &mut view).is_err());
        assert!(copy_struct(&5, &mut view).is_err());
    }
}
