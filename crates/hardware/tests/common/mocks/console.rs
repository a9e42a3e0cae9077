use std::io;

use mockall::mock;
use pipesim_core::soc::devices::Console;

mock! {
    pub Terminal {}
    impl Console for Terminal {
        fn print(&mut self, bytes: &[u8]) -> io::Result<()>;
        fn read_char(&mut self) -> io::Result<u8>;
        fn read_token(&mut self) -> io::Result<Vec<u8>>;
    }
}
