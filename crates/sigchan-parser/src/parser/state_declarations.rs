//! Parser state - source file and declaration parsing methods.

use sigchan_scanner::SyntaxKind;

use super::base::{NodeIndex, NodeList};
use super::node::{
    FuncDeclData, GenDeclData, ImportSpecData, NodeData, SourceFileData, TypeSpecData,
    ValueSpecData,
};
use super::state::ParserState;

impl ParserState {
    /// Parse a complete source file and return its `SourceFile` node.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        self.next_token();

        let package_name = if self.expect(SyntaxKind::PackageKeyword) {
            let name = self.parse_ident();
            self.expect_semi();
            name
        } else {
            self.sync_declaration();
            NodeIndex::NONE
        };

        let mut imports = NodeList::new();
        while self.is_token(SyntaxKind::ImportKeyword) {
            let decl = self.parse_gen_decl(SyntaxKind::ImportKeyword);
            imports.push(decl);
        }

        let mut decls = NodeList::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            let before = self.token_pos();
            let decl = self.parse_top_level_decl();
            if decl.is_some() {
                decls.push(decl);
            }
            if self.token_pos() == before && !self.is_token(SyntaxKind::EndOfFileToken) {
                self.next_token();
            }
        }

        let end = self.scanner.source_text().len() as u32;
        let comments = self.scanner.take_comments();
        self.arena.add(
            0,
            end,
            NodeData::SourceFile(SourceFileData {
                file_name: self.file_name.clone(),
                text: self.scanner.source_text_arc(),
                package_name,
                imports,
                decls,
                comments,
            }),
        )
    }

    fn parse_top_level_decl(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::FuncKeyword => self.parse_func_decl(),
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword | SyntaxKind::TypeKeyword => {
                let keyword = self.token();
                self.parse_gen_decl(keyword)
            }
            SyntaxKind::ImportKeyword => {
                self.error_at_current_token("imports must appear before other declarations".into());
                self.parse_gen_decl(SyntaxKind::ImportKeyword)
            }
            SyntaxKind::SemicolonToken => {
                self.next_token();
                NodeIndex::NONE
            }
            _ => {
                let message = format!("expected declaration, found {}", self.describe_token());
                self.error_at_current_token(message);
                self.next_token();
                self.sync_declaration();
                NodeIndex::NONE
            }
        }
    }

    pub(crate) fn parse_ident(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        if self.is_token(SyntaxKind::Identifier) {
            let name = self.token_text().to_string();
            self.next_token();
            return self.arena.add_identifier(pos, self.prev_end, name);
        }
        let message = format!("expected identifier, found {}", self.describe_token());
        self.error_at_current_token(message);
        self.arena.add_identifier(pos, pos, "_")
    }

    pub(crate) fn parse_ident_list(&mut self) -> NodeList {
        let mut list = NodeList::new();
        list.push(self.parse_ident());
        while self.parse_optional(SyntaxKind::CommaToken) {
            list.push(self.parse_ident());
        }
        list
    }

    /// `import`, `var`, `const` or `type`, either a single spec or a
    /// parenthesized group.
    pub(crate) fn parse_gen_decl(&mut self, keyword: SyntaxKind) -> NodeIndex {
        let pos = self.token_pos();
        self.expect(keyword);

        let mut specs = NodeList::new();
        let grouped = self.parse_optional(SyntaxKind::OpenParenToken);
        if grouped {
            while !self.is_token(SyntaxKind::CloseParenToken)
                && !self.is_token(SyntaxKind::EndOfFileToken)
            {
                let before = self.token_pos();
                specs.push(self.parse_spec(keyword));
                self.expect_semi();
                if self.token_pos() == before {
                    self.next_token();
                }
            }
            self.expect(SyntaxKind::CloseParenToken);
        } else {
            specs.push(self.parse_spec(keyword));
        }
        let end = self.prev_end;
        self.expect_semi();

        self.arena.add(
            pos,
            end,
            NodeData::GenDecl(GenDeclData {
                keyword,
                grouped,
                specs,
            }),
        )
    }

    fn parse_spec(&mut self, keyword: SyntaxKind) -> NodeIndex {
        match keyword {
            SyntaxKind::ImportKeyword => self.parse_import_spec(),
            SyntaxKind::TypeKeyword => self.parse_type_spec(),
            _ => self.parse_value_spec(keyword),
        }
    }

    fn parse_import_spec(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let name = match self.token() {
            SyntaxKind::Identifier => self.parse_ident(),
            SyntaxKind::DotToken => {
                self.next_token();
                self.arena.add_identifier(pos, self.prev_end, ".")
            }
            _ => NodeIndex::NONE,
        };

        let path = if self.is_token(SyntaxKind::StringLiteral) {
            let text = self.token_text();
            let path = text
                .trim_start_matches(['"', '`'])
                .trim_end_matches(['"', '`'])
                .to_string();
            self.next_token();
            path
        } else {
            let message = format!("expected import path, found {}", self.describe_token());
            self.error_at_current_token(message);
            String::new()
        };

        self.arena.add(
            pos,
            self.prev_end,
            NodeData::ImportSpec(ImportSpecData { name, path }),
        )
    }

    fn parse_value_spec(&mut self, keyword: SyntaxKind) -> NodeIndex {
        let pos = self.token_pos();
        let names = self.parse_ident_list();

        let type_node = match self.token() {
            SyntaxKind::EqualsToken
            | SyntaxKind::SemicolonToken
            | SyntaxKind::CloseParenToken => NodeIndex::NONE,
            _ => self.parse_type(),
        };

        let mut values = NodeList::new();
        if self.parse_optional(SyntaxKind::EqualsToken) {
            values = self.parse_expr_list();
        } else if keyword == SyntaxKind::VarKeyword && type_node.is_none() {
            let message = "missing variable type or initialization";
            self.error_at(pos, self.prev_end - pos, message.into());
        }

        self.arena.add(
            pos,
            self.prev_end,
            NodeData::ValueSpec(ValueSpecData {
                names,
                type_node,
                values,
            }),
        )
    }

    fn parse_type_spec(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let name = self.parse_ident();
        let is_alias = self.parse_optional(SyntaxKind::EqualsToken);
        let type_node = self.parse_type();
        self.arena.add(
            pos,
            self.prev_end,
            NodeData::TypeSpec(TypeSpecData {
                name,
                is_alias,
                type_node,
            }),
        )
    }

    fn parse_func_decl(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.expect(SyntaxKind::FuncKeyword);

        let receiver = if self.is_token(SyntaxKind::OpenParenToken) {
            self.parse_parameters()
        } else {
            NodeList::new()
        };
        let name = self.parse_ident();
        let signature = self.parse_signature(pos);

        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            let saved = self.expr_lev;
            self.expr_lev = 0;
            let body = self.parse_block();
            self.expr_lev = saved;
            body
        } else {
            NodeIndex::NONE
        };
        let end = self.prev_end;
        self.expect_semi();

        self.arena.add(
            pos,
            end,
            NodeData::FuncDecl(FuncDeclData {
                receiver,
                name,
                signature,
                body,
            }),
        )
    }
}
