mod file_printer;
mod mock_printer;
mod network_printer;

pub use file_printer::FilePrinter;
pub use mock_printer::MockPrinter;
pub use network_printer::NetworkPrinter;
