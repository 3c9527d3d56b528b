//! Dense name dictionaries shared by labels and exact features.

use std::collections::HashMap;

use super::ModelError;

/// Invert a name -> index dictionary whose indices must be exactly `0..n`.
///
/// Returns the names ordered by index.
pub(crate) fn invert_dense<I>(entries: I, what: &'static str) -> Result<Vec<String>, ModelError>
where
    I: IntoIterator<Item = (String, usize)>,
    I::IntoIter: ExactSizeIterator,
{
    let entries = entries.into_iter();
    let len = entries.len();
    let mut slots: Vec<Option<String>> = vec![None; len];
    for (name, index) in entries {
        let slot = slots
            .get_mut(index)
            .ok_or(ModelError::IndexOutOfRange { what, index, len })?;
        if let Some(first) = slot.take() {
            // Keep the reported pair in a stable order.
            let (first, second) = if first <= name { (first, name) } else { (name, first) };
            return Err(ModelError::DuplicateIndex {
                what,
                index,
                first,
                second,
            });
        }
        *slot = Some(name);
    }
    // n entries into n slots with no collision fills every slot.
    Ok(slots.into_iter().flatten().collect())
}

/// Build the name -> index dictionary for names given in index order.
pub(crate) fn index_names(
    names: &[String],
    what: &'static str,
) -> Result<HashMap<String, usize>, ModelError> {
    let mut index = HashMap::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        if index.insert(name.clone(), i).is_some() {
            return Err(ModelError::DuplicateName {
                what,
                name: name.clone(),
            });
        }
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, usize)]) -> Vec<(String, usize)> {
        pairs.iter().map(|&(n, i)| (n.to_string(), i)).collect()
    }

    #[test]
    fn inverts_dense_dictionary() {
        let names = invert_dense(entries(&[("b", 1), ("c", 2), ("a", 0)]), "label").unwrap();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn rejects_gap() {
        let err = invert_dense(entries(&[("a", 0), ("b", 2)]), "label").unwrap_err();
        assert_eq!(
            err,
            ModelError::IndexOutOfRange {
                what: "label",
                index: 2,
                len: 2
            }
        );
    }

    #[test]
    fn rejects_shared_index() {
        let err = invert_dense(entries(&[("x", 0), ("a", 0)]), "feature").unwrap_err();
        assert!(matches!(err, ModelError::DuplicateIndex { index: 0, .. }));
    }

    #[test]
    fn index_names_rejects_duplicates() {
        let names = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        let err = index_names(&names, "feature").unwrap_err();
        assert!(matches!(err, ModelError::DuplicateName { .. }));
    }
}
