use std::{fmt, str::FromStr};

use chrono::{Datelike as _, NaiveDate};
use thiserror::Error;

/// A calendar month in `YYYY-MM` form, the identity of one payroll run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Periodo {
    anio: i32,
    mes: u32,
}

#[derive(Debug, Error)]
#[error("Período debe estar en formato YYYY-MM")]
pub struct PeriodoInvalido;

impl FromStr for Periodo {
    type Err = PeriodoInvalido;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((anio, mes)) = s.split_once('-') else {
            return Err(PeriodoInvalido);
        };

        if anio.len() != 4 || mes.len() != 2 {
            return Err(PeriodoInvalido);
        }

        // `parse` tolera un `+` inicial; acá solo valen dígitos
        if !anio.bytes().all(|b| b.is_ascii_digit()) || !mes.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PeriodoInvalido);
        }

        let anio = anio.parse().map_err(|_| PeriodoInvalido)?;
        let mes = mes.parse().map_err(|_| PeriodoInvalido)?;

        if !(1..=12).contains(&mes) {
            return Err(PeriodoInvalido);
        }

        Ok(Self { anio, mes })
    }
}

impl fmt::Display for Periodo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.anio, self.mes)
    }
}

impl Periodo {
    pub fn primer_dia(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.anio, self.mes, 1).expect("mes is validated on parse")
    }

    pub fn ultimo_dia(&self) -> NaiveDate {
        let (anio, mes) = match self.mes {
            12 => (self.anio + 1, 1),
            _ => (self.anio, self.mes + 1),
        };

        NaiveDate::from_ymd_opt(anio, mes, 1)
            .and_then(|primero_siguiente| primero_siguiente.pred_opt())
            .expect("mes is validated on parse")
    }

    pub fn dias_del_mes(&self) -> i32 {
        self.ultimo_dia().day() as i32
    }
}
