use crate::domain::models::expense::Expense;
use shared::ExpenseOut;

/// Mapper to convert domain expenses into wire DTOs.
pub struct ExpenseMapper;

impl ExpenseMapper {
    /// Converts a domain Expense into the `ExpenseOut` DTO.
    pub fn to_dto(domain: Expense) -> ExpenseOut {
        ExpenseOut {
            id: domain.id,
            title: domain.title,
        }
    }

    pub fn to_dto_list(domain_expenses: Vec<Expense>) -> Vec<ExpenseOut> {
        domain_expenses.into_iter().map(Self::to_dto).collect()
    }
}
