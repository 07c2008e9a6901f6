//! Type expressions and field lists.

use sigchan_parser::parser::node::{ChanDir, FuncTypeData};
use sigchan_parser::{NodeData, NodeIndex, NodeList};

use super::{LOWEST_PREC, PrintError, Printer};

impl Printer<'_> {
    pub(super) fn emit_type(&mut self, index: NodeIndex) -> Result<(), PrintError> {
        let node = self
            .arena
            .get(index)
            .ok_or(PrintError::MissingNode { index: index.0 })?;
        match &node.data {
            NodeData::ArrayType { length, element } => {
                self.write("[");
                if length.is_some() {
                    self.expr1(*length, LOWEST_PREC, 1)?;
                }
                self.write("]");
                self.expr1(*element, LOWEST_PREC, 1)
            }
            NodeData::MapType { key, value } => {
                self.write("map[");
                self.expr1(*key, LOWEST_PREC, 1)?;
                self.write("]");
                self.expr1(*value, LOWEST_PREC, 1)
            }
            NodeData::ChanType(chan) => {
                self.write(match chan.dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Recv => "<-chan ",
                });
                self.expr1(chan.element, LOWEST_PREC, 1)
            }
            NodeData::FuncType(func) => {
                self.write("func");
                self.emit_signature(func)
            }
            NodeData::StructType { fields } => {
                self.write("struct{");
                self.emit_field_block(fields, false)?;
                self.write("}");
                Ok(())
            }
            NodeData::InterfaceType { methods } => {
                self.write("interface{");
                self.emit_field_block(methods, true)?;
                self.write("}");
                Ok(())
            }
            _ => self.expr1(index, LOWEST_PREC, 1),
        }
    }

    /// `(params) results`, without the `func` keyword.
    fn emit_signature(&mut self, func: &FuncTypeData) -> Result<(), PrintError> {
        self.write("(");
        self.emit_fields(&func.params)?;
        self.write(")");

        let single_unnamed = func.results.len() == 1
            && matches!(
                self.arena.get(func.results[0]).map(|n| &n.data),
                Some(NodeData::Field(field)) if field.names.is_empty()
            );
        if single_unnamed {
            self.write_space();
            self.emit_fields(&func.results)?;
        } else if !func.results.is_empty() {
            self.write(" (");
            self.emit_fields(&func.results)?;
            self.write(")");
        }
        Ok(())
    }

    /// Parameter-style list: `a, b int, c string`.
    fn emit_fields(&mut self, fields: &NodeList) -> Result<(), PrintError> {
        for (i, &field) in fields.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_field(field, false)?;
        }
        Ok(())
    }

    /// Single-line struct or interface body: `{ a int; b string }`.
    fn emit_field_block(
        &mut self,
        fields: &NodeList,
        is_interface: bool,
    ) -> Result<(), PrintError> {
        if fields.is_empty() {
            return Ok(());
        }
        self.write_space();
        for (i, &field) in fields.iter().enumerate() {
            if i > 0 {
                self.write("; ");
            }
            self.emit_field(field, is_interface)?;
        }
        self.write_space();
        Ok(())
    }

    fn emit_field(&mut self, index: NodeIndex, is_interface: bool) -> Result<(), PrintError> {
        let node = self
            .arena
            .get(index)
            .ok_or(PrintError::MissingNode { index: index.0 })?;
        let NodeData::Field(field) = &node.data else {
            return self.expr1(index, LOWEST_PREC, 1);
        };

        // Interface methods print as `Name(params) results`.
        if is_interface
            && let [name] = field.names.as_slice()
            && let Some(NodeData::FuncType(func)) = self.arena.get(field.type_node).map(|n| &n.data)
        {
            self.expr1(*name, LOWEST_PREC, 1)?;
            return self.emit_signature(func);
        }

        for (i, &name) in field.names.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.expr1(name, LOWEST_PREC, 1)?;
        }
        if !field.names.is_empty() {
            self.write_space();
        }
        self.emit_type(field.type_node)?;
        if field.tag.is_some() {
            self.write_space();
            self.expr1(field.tag, LOWEST_PREC, 1)?;
        }
        Ok(())
    }
}
