//! Plain-text invoices and money receipts.

mod format;
mod invoice;
mod receipt;

pub use format::{format_amount, format_money};
pub use invoice::{
    generate_invoice, generate_invoice_number, BillTo, GeneratedInvoice, InvoiceDocument,
    InvoiceError, InvoiceRequest,
};
pub use receipt::{amount_in_words, MoneyReceipt};
