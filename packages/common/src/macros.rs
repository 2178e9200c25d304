/// Returns `Ok(())` when `$assert` holds, otherwise logs the error code and
/// returns it as `Err`. Works with any `#[repr(u32)]` contract error.
#[macro_export]
macro_rules! validate {
    ($env:expr, $assert:expr, $err:expr) => {
        {
            if $assert {
                Ok(())
            } else {
                let error_code = $err;
                let code = error_code as u32;
                ::soroban_sdk::log!($env, "Error {} thrown at line {}", code, line!());
                Err(error_code)
            }
        }
    };
    (
        $env:expr,
        $assert:expr,
        $err:expr,
        $($arg:tt)+
    ) => {
        {
            if $assert {
                Ok(())
            } else {
                let error_code = $err;
                let code = error_code as u32;
                ::soroban_sdk::log!($env, "Error {} thrown at line {}", code, line!());
                ::soroban_sdk::log!($env, $($arg)+);
                Err(error_code)
            }
        }
    };
}

#[macro_export]
macro_rules! safe_increment {
    ($env:expr, $struct:expr, $value:expr) => {{
        $struct = $crate::math::safe_math::SafeMath::safe_add($struct, $value, $env)?
    }};
}
