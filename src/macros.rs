//!

/// Build a [`KeyPress`](crate::key::KeyPress) value.
///
/// ```
/// # use line_block::key;
/// let enter = key!(@name Enter);
/// let shift_tab = key!(@name SHIFT-BackTab);
/// let x = key!('x');
/// let ctrl_x = key!(CONTROL-'x');
/// let ctrl_alt = key!(CONTROL|ALT-']');
/// # let _ = (enter, shift_tab, x, ctrl_x, ctrl_alt);
/// ```
#[macro_export]
macro_rules! key {
    (@name $($modifier:ident)|+ - $name:ident) => {
        // The key `$modifier` is expected to be one of
        // {SHIFT, CONTROL, ALT, NONE}
        $crate::key::KeyPress::new(
            $crate::key::KeyCode::$name,
            $($crate::key::KeyModifiers::$modifier)|+,
        )
    };
    (@name $name:ident) => {
        $crate::key::KeyPress::new(
            $crate::key::KeyCode::$name,
            $crate::key::KeyModifiers::NONE,
        )
    };
    ($($modifier:ident)|+ - $char:expr) => {
        $crate::key::KeyPress::new(
            $crate::key::KeyCode::Char($char),
            $($crate::key::KeyModifiers::$modifier)|+,
        )
    };
    ($char:expr) => {
        $crate::key::KeyPress::new(
            $crate::key::KeyCode::Char($char),
            $crate::key::KeyModifiers::NONE,
        )
    };
}
