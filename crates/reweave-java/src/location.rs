//! Where a `Space` sits in the tree
//!
//! Formatting visitors key their decisions on these locations. Padding and
//! container locations map to the space location of their own `before` or
//! `after` and to the location of their elements.

/// Every place a `Space` can occur
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpaceLocation {
    CompilationUnitPrefix,
    CompilationUnitEof,
    CompilationUnitStatementSuffix,
    BlockPrefix,
    BlockEnd,
    BlockStatementSuffix,
    IfPrefix,
    IfThenSuffix,
    ElsePrefix,
    ElseSuffix,
    ReturnPrefix,
    AssignmentPrefix,
    AssignmentOperatorPrefix,
    BinaryPrefix,
    BinaryOperator,
    IdentifierPrefix,
    LiteralPrefix,
    FieldAccessPrefix,
    FieldAccessName,
    MethodInvocationPrefix,
    MethodSelectSuffix,
    MethodInvocationArguments,
    MethodInvocationArgumentSuffix,
    MethodDeclarationPrefix,
    MethodDeclarationParameters,
    MethodDeclarationParameterSuffix,
    ParenthesesPrefix,
    ParenthesesSuffix,
    CollectionLiteralPrefix,
    CollectionLiteralElements,
    CollectionLiteralElementSuffix,
    EmptyPrefix,
    UnknownPrefix,
    TrailingCommaSuffix,
}

impl SpaceLocation {
    /// The prefix of a tree, as opposed to padding, delimiters or end of file
    pub fn is_tree_prefix(self) -> bool {
        matches!(
            self,
            SpaceLocation::CompilationUnitPrefix
                | SpaceLocation::BlockPrefix
                | SpaceLocation::IfPrefix
                | SpaceLocation::ElsePrefix
                | SpaceLocation::ReturnPrefix
                | SpaceLocation::AssignmentPrefix
                | SpaceLocation::BinaryPrefix
                | SpaceLocation::IdentifierPrefix
                | SpaceLocation::LiteralPrefix
                | SpaceLocation::FieldAccessPrefix
                | SpaceLocation::MethodInvocationPrefix
                | SpaceLocation::MethodDeclarationPrefix
                | SpaceLocation::ParenthesesPrefix
                | SpaceLocation::CollectionLiteralPrefix
                | SpaceLocation::EmptyPrefix
                | SpaceLocation::UnknownPrefix
        )
    }
}

/// Locations of right-padded elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RightPaddedLocation {
    CompilationUnitStatement,
    BlockStatement,
    IfThen,
    ElseBody,
    MethodSelect,
    MethodInvocationArgument,
    MethodDeclarationParameter,
    Parentheses,
    CollectionElement,
}

impl RightPaddedLocation {
    pub fn after_location(self) -> SpaceLocation {
        match self {
            RightPaddedLocation::CompilationUnitStatement => SpaceLocation::CompilationUnitStatementSuffix,
            RightPaddedLocation::BlockStatement => SpaceLocation::BlockStatementSuffix,
            RightPaddedLocation::IfThen => SpaceLocation::IfThenSuffix,
            RightPaddedLocation::ElseBody => SpaceLocation::ElseSuffix,
            RightPaddedLocation::MethodSelect => SpaceLocation::MethodSelectSuffix,
            RightPaddedLocation::MethodInvocationArgument => SpaceLocation::MethodInvocationArgumentSuffix,
            RightPaddedLocation::MethodDeclarationParameter => SpaceLocation::MethodDeclarationParameterSuffix,
            RightPaddedLocation::Parentheses => SpaceLocation::ParenthesesSuffix,
            RightPaddedLocation::CollectionElement => SpaceLocation::CollectionLiteralElementSuffix,
        }
    }

    /// Elements of a delimited, comma separated list
    pub fn is_container_element(self) -> bool {
        matches!(
            self,
            RightPaddedLocation::MethodInvocationArgument
                | RightPaddedLocation::MethodDeclarationParameter
                | RightPaddedLocation::CollectionElement
        )
    }
}

/// Locations of left-padded elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeftPaddedLocation {
    AssignmentValue,
    BinaryOperator,
    FieldAccessName,
}

impl LeftPaddedLocation {
    pub fn before_location(self) -> SpaceLocation {
        match self {
            LeftPaddedLocation::AssignmentValue => SpaceLocation::AssignmentOperatorPrefix,
            LeftPaddedLocation::BinaryOperator => SpaceLocation::BinaryOperator,
            LeftPaddedLocation::FieldAccessName => SpaceLocation::FieldAccessName,
        }
    }
}

/// Locations of containers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerLocation {
    MethodInvocationArguments,
    MethodDeclarationParameters,
    CollectionElements,
}

impl ContainerLocation {
    pub fn before_location(self) -> SpaceLocation {
        match self {
            ContainerLocation::MethodInvocationArguments => SpaceLocation::MethodInvocationArguments,
            ContainerLocation::MethodDeclarationParameters => SpaceLocation::MethodDeclarationParameters,
            ContainerLocation::CollectionElements => SpaceLocation::CollectionLiteralElements,
        }
    }

    pub fn element_location(self) -> RightPaddedLocation {
        match self {
            ContainerLocation::MethodInvocationArguments => RightPaddedLocation::MethodInvocationArgument,
            ContainerLocation::MethodDeclarationParameters => RightPaddedLocation::MethodDeclarationParameter,
            ContainerLocation::CollectionElements => RightPaddedLocation::CollectionElement,
        }
    }
}
