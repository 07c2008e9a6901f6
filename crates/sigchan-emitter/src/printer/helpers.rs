//! Output helpers.

use sigchan_parser::NodeList;

use super::{LOWEST_PREC, PrintError, Printer};

impl Printer<'_> {
    pub(crate) fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    pub(crate) fn write_space(&mut self) {
        self.out.push(' ');
    }

    /// Comma-separated expressions.
    pub(crate) fn emit_list(&mut self, list: &NodeList, depth: u32) -> Result<(), PrintError> {
        for (i, &item) in list.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.expr1(item, LOWEST_PREC, depth)?;
        }
        Ok(())
    }
}
