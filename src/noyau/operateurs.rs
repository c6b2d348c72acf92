// src/noyau/operateurs.rs
//
// Table (constante) des opérateurs : précédence, associativité, arité.
//
//   +  -      : 1, gauche, 2
//   *  /  %   : 2, gauche, 2
//   moins u.  : 3, droite, 1
//   ^         : 4, droite, 2
//
// Le moins unaire est un opérateur distinct du moins binaire : rpn.rs le
// choisit selon la position, la lecture ne voit que '-'.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assoc {
    Gauche,
    Droite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpInfo {
    pub precedence: u8,
    pub assoc: Assoc,
    pub arite: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Neg,
}

impl Op {
    /// Opérateur binaire correspondant à un symbole.
    pub fn from_symbol(c: char) -> Option<Op> {
        match c {
            '+' => Some(Op::Add),
            '-' => Some(Op::Sub),
            '*' => Some(Op::Mul),
            '/' => Some(Op::Div),
            '%' => Some(Op::Rem),
            '^' => Some(Op::Pow),
            _ => None,
        }
    }

    pub const fn info(self) -> OpInfo {
        let (precedence, assoc, arite) = match self {
            Op::Add | Op::Sub => (1, Assoc::Gauche, 2),
            Op::Mul | Op::Div | Op::Rem => (2, Assoc::Gauche, 2),
            Op::Neg => (3, Assoc::Droite, 1),
            Op::Pow => (4, Assoc::Droite, 2),
        };
        OpInfo {
            precedence,
            assoc,
            arite,
        }
    }

    /// Symbole d’affichage (le moins unaire s’affiche `~` dans la démarche).
    pub const fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
            Op::Rem => '%',
            Op::Pow => '^',
            Op::Neg => '~',
        }
    }

    /// `self` (nouvel opérateur) doit-il faire sortir `top` de la pile ?
    ///
    /// Un opérateur préfixe n’a pas d’opérande gauche : il ne fait rien sortir.
    pub fn cede_a(self, top: Op) -> bool {
        let n = self.info();
        let t = top.info();
        if n.arite == 1 {
            return false;
        }
        match n.assoc {
            Assoc::Droite => n.precedence < t.precedence,
            Assoc::Gauche => n.precedence <= t.precedence,
        }
    }
}
