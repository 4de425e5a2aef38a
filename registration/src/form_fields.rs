/// Create an enum of form fields that can be cycled through with
/// tab/shift-tab. Each field carries the label we show above it.
#[macro_export]
macro_rules! form_fields {
    ($name:ident, $($variant:ident => $label:expr),* $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            const FIELDS: &'static [$name] = &[
                $($name::$variant),*
            ];

            fn index(self) -> usize {
                self as usize
            }

            /// Rotate through the fields (e.g. with tab)
            pub fn next(self) -> Self {
                Self::FIELDS[(self.index() + 1) % Self::FIELDS.len()]
            }

            /// Rotate through the fields in reverse (e.g. with shift-tab)
            pub fn prev(self) -> Self {
                Self::FIELDS[(self.index() + Self::FIELDS.len() - 1) % Self::FIELDS.len()]
            }

            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),*
                }
            }
        }
    };
}
