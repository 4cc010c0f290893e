// Resource<T> - tri-state wrapper published to observers of an async load

/// Outcome of an asynchronous load as seen by the UI
#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> Resource<T> {
    pub fn loading() -> Self {
        Resource::Loading
    }

    pub fn success(data: T) -> Self {
        Resource::Success(data)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Resource::Error(message.into())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Resource::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Resource::Error(_))
    }

    /// Payload of a Success, None otherwise
    pub fn data(&self) -> Option<&T> {
        match self {
            Resource::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Message of an Error, None otherwise
    pub fn message(&self) -> Option<&str> {
        match self {
            Resource::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Resource::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let loading: Resource<Vec<u8>> = Resource::loading();
        assert!(loading.is_loading());
        assert_eq!(loading.data(), None);
        assert_eq!(loading.message(), None);

        let ok = Resource::success(vec![1, 2, 3]);
        assert!(ok.is_success());
        assert_eq!(ok.data().map(|v| v.len()), Some(3));

        let failed: Resource<Vec<u8>> = Resource::error("boom");
        assert!(failed.is_error());
        assert_eq!(failed.message(), Some("boom"));
        assert_eq!(failed.data(), None);
    }

    #[test]
    fn test_default_is_loading() {
        let state: Resource<String> = Resource::default();
        assert!(state.is_loading());
    }
}
