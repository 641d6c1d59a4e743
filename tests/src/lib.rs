
pub mod fixtures;
pub mod prelude;

pub use db_test::DbTest;
pub use exec_log::ExecLog;
pub use logging_driver::{DriverOp, LoggingDriver};

use quarry_driver_memory::Memory;

pub trait Setup: 'static {
    /// A fresh, empty store for one test.
    fn store(&self) -> Memory;
}

#[macro_export]
macro_rules! models {
    (
        $( $model:ty ),*
    ) => {{
        let mut builder = quarry::Db::builder();
        $( builder.register::<$model>(); )*
        builder
    }};
}

#[macro_export]
macro_rules! tests {
    (
        $(
            $( #[$attrs:meta] )*
            $f:ident
        ),+
    ) => {
        mod memory {
            $(
                #[test]
                $( #[$attrs] )*
                fn $f() {
                    let mut test = $crate::DbTest::new(
                        $crate::db::memory::SetupMemory
                    );

                    super::$f(&mut test);
                }
            )*
        }
    };
    (
        $(
            $( #[$attrs:meta] )*
            $f:ident,
        )+
    ) => {
        $crate::tests!( $(
            $( #[$attrs] )*
            $f
        ),+ );
    }
}
