use chrono::{Datelike, NaiveDate};
use tracing::debug;

use super::allocation_service::round_half_up;
use crate::errors::CoreError;
use crate::models::allocation::Distribution;
use crate::models::analysis::{
    CategoryExpense, FinancialAnalysis, FinancialHealth, InvestmentSuggestion,
};
use crate::models::budget::{ExpenseCategory, FinancialData, FixedExpense, VariableExpense};

/// Number of calendar months (current included) variable expenses are averaged over.
pub const VARIABLE_WINDOW_MONTHS: i64 = 3;

/// Emergency-fund target, in months of expenses.
pub const EMERGENCY_FUND_MONTHS: u32 = 6;

/// More fixed bills than this triggers the consolidation tip.
pub const MAX_FIXED_EXPENSES: usize = 10;

/// Scores monthly cash-flow health and edits the budget record.
///
/// No I/O; `today` is always passed in.
pub struct BudgetService;

impl BudgetService {
    pub fn new() -> Self {
        Self
    }

    // ── Analysis ────────────────────────────────────────────────────

    /// Aggregate a budget record into a `FinancialAnalysis` as of `today`.
    ///
    /// Variable expenses from the trailing 3 calendar months are summed and
    /// divided by `min(3, matching records)`. The divisor counts records,
    /// not distinct months.
    pub fn analyze_financial_data(&self, data: &FinancialData, today: NaiveDate) -> FinancialAnalysis {
        let income = data.monthly_income;
        let total_fixed: f64 = data.fixed_expenses.iter().map(|e| e.amount).sum();

        let recent: Vec<&VariableExpense> = data
            .variable_expenses
            .iter()
            .filter(|e| Self::in_window(e, today))
            .collect();
        let divisor = recent.len().min(VARIABLE_WINDOW_MONTHS as usize) as f64;
        let avg_variable = if recent.is_empty() {
            0.0
        } else {
            recent.iter().map(|e| e.amount).sum::<f64>() / divisor
        };

        let total_expenses = total_fixed + avg_variable;
        let remaining = income - total_expenses;
        let savings_rate = if income > 0.0 {
            remaining / income * 100.0
        } else {
            0.0
        };

        // Insertion-ordered so ties keep first-seen order after the stable sort
        let mut by_category: Vec<(ExpenseCategory, f64)> = Vec::new();
        let mut add = |category: ExpenseCategory, amount: f64| {
            match by_category.iter_mut().find(|(c, _)| *c == category) {
                Some((_, total)) => *total += amount,
                None => by_category.push((category, amount)),
            }
        };
        for e in &data.fixed_expenses {
            add(e.category.into(), e.amount);
        }
        for e in &recent {
            add(e.category.into(), e.amount / divisor);
        }

        let mut expenses_by_category: Vec<CategoryExpense> = by_category
            .into_iter()
            .map(|(category, amount)| CategoryExpense {
                category,
                label: category.label().to_string(),
                amount,
                percentage: if total_expenses > 0.0 {
                    amount / total_expenses * 100.0
                } else {
                    0.0
                },
                color: category.color().to_string(),
            })
            .collect();
        expenses_by_category.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let financial_health = FinancialHealth::from_savings_rate(savings_rate);

        debug!(
            total_fixed,
            avg_variable,
            recent_variable = recent.len(),
            savings_rate,
            health = %financial_health,
            "analyzed financial data"
        );

        let recommendations = Self::recommendations(
            data,
            total_fixed,
            remaining,
            savings_rate,
            &expenses_by_category,
        );
        let investment_suggestion =
            self.generate_investment_suggestion(income, remaining, savings_rate, financial_health);

        FinancialAnalysis {
            total_fixed_expenses: total_fixed,
            total_variable_expenses: avg_variable,
            total_expenses,
            remaining_balance: remaining,
            savings_rate,
            expenses_by_category,
            financial_health,
            recommendations,
            investment_suggestion,
        }
    }

    /// How much to invest each month and how to split it.
    pub fn generate_investment_suggestion(
        &self,
        income: f64,
        remaining: f64,
        savings_rate: f64,
        health: FinancialHealth,
    ) -> InvestmentSuggestion {
        let monthly_expenses = income - remaining;
        let emergency_fund = monthly_expenses * f64::from(EMERGENCY_FUND_MONTHS);

        let (investment_percentage, investment_rate): (u8, f64) = if savings_rate >= 30.0 {
            (20, 0.2)
        } else if savings_rate >= 20.0 {
            (15, 0.15)
        } else if savings_rate >= 10.0 {
            (10, 0.1)
        } else {
            (5, 0.05)
        };
        let investment_amount = income * investment_rate;

        let distribution = match health {
            FinancialHealth::Excellent => Distribution::new(50, 40, 10),
            FinancialHealth::Good => Distribution::new(60, 35, 5),
            FinancialHealth::Warning => Distribution::new(80, 20, 0),
            FinancialHealth::Critical => Distribution::new(100, 0, 0),
        };

        let mut tips = Vec::new();
        match health {
            FinancialHealth::Critical | FinancialHealth::Warning => {
                tips.push(
                    "🎯 Foque primeiro em construir sua reserva de emergência em Tesouro Selic ou \
                     CDB de liquidez diária."
                        .to_string(),
                );
                tips.push(
                    "📈 Após ter 6 meses de despesas guardadas, comece a diversificar em ações e fundos."
                        .to_string(),
                );
            }
            FinancialHealth::Good | FinancialHealth::Excellent => {
                tips.push(
                    "💎 Com sua saúde financeira boa, você pode diversificar em ativos de maior retorno."
                        .to_string(),
                );
                tips.push(
                    "📊 Considere aportes mensais automáticos para aproveitar o custo médio.".to_string(),
                );
            }
        }
        // Cents round half-up; `{:.2}` alone would send exact ties to even
        let goal_cents = round_half_up(investment_amount * 100.0) / 100.0;
        tips.push(format!(
            "💰 Meta: Investir R$ {goal_cents:.2} por mês ({investment_percentage}% da renda)."
        ));
        if distribution.crypto > 0 {
            tips.push("⚠️ Criptomoedas são de alto risco. Invista apenas o que pode perder.".to_string());
        }
        tips.push("🔄 Revise sua carteira a cada 3 meses e rebalanceie se necessário.".to_string());
        tips.push(
            "📚 Continue estudando sobre investimentos para tomar decisões mais informadas.".to_string(),
        );

        InvestmentSuggestion {
            emergency_fund,
            emergency_fund_months: EMERGENCY_FUND_MONTHS,
            investment_amount,
            investment_percentage,
            distribution,
            tips,
        }
    }

    /// Independent threshold checks, emitted in check order.
    fn recommendations(
        data: &FinancialData,
        total_fixed: f64,
        remaining: f64,
        savings_rate: f64,
        categories: &[CategoryExpense],
    ) -> Vec<String> {
        let income = data.monthly_income;
        let mut out = Vec::new();

        if savings_rate < 10.0 {
            out.push(
                "🚨 Sua taxa de poupança está muito baixa. Tente reduzir despesas não essenciais \
                 para aumentar para pelo menos 10%."
                    .to_string(),
            );
        } else if savings_rate < 20.0 {
            out.push(
                "⚠️ Sua taxa de poupança está abaixo do ideal. Meta: 20-30% da renda para construir \
                 patrimônio."
                    .to_string(),
            );
        } else if savings_rate >= 30.0 {
            out.push(
                "✅ Excelente! Você está poupando mais de 30% da renda. Continue assim e considere \
                 aumentar investimentos."
                    .to_string(),
            );
        }

        // Without income any fixed spending is over the limit
        let fixed_over_half = if income > 0.0 {
            total_fixed / income * 100.0 > 50.0
        } else {
            total_fixed > 0.0
        };
        if fixed_over_half {
            out.push(
                "💡 Suas despesas fixas representam mais de 50% da renda. Considere renegociar \
                 contratos ou buscar alternativas mais econômicas."
                    .to_string(),
            );
        }

        let share = |category: ExpenseCategory| {
            categories
                .iter()
                .find(|c| c.category == category)
                .map(|c| c.percentage)
        };
        if share(ExpenseCategory::Housing).is_some_and(|p| p > 30.0) {
            out.push(
                "🏠 Gastos com moradia estão acima de 30% da renda. Avalie se é possível reduzir \
                 aluguel ou custos de manutenção."
                    .to_string(),
            );
        }
        if share(ExpenseCategory::Food).is_some_and(|p| p > 20.0) {
            out.push(
                "🍽️ Gastos com alimentação estão elevados. Considere cozinhar mais em casa e \
                 reduzir delivery/restaurantes."
                    .to_string(),
            );
        }
        if share(ExpenseCategory::Entertainment).is_some_and(|p| p > 10.0) {
            out.push(
                "🎮 Gastos com lazer estão acima de 10%. Busque opções gratuitas ou mais econômicas \
                 de entretenimento."
                    .to_string(),
            );
        }

        let emergency_short = if income > 0.0 {
            remaining * 6.0 / income < 3.0
        } else {
            remaining < 0.0
        };
        if emergency_short {
            out.push(
                "💰 Priorize construir uma reserva de emergência de 6 meses de despesas antes de \
                 investir valores maiores."
                    .to_string(),
            );
        }

        if data.fixed_expenses.len() > MAX_FIXED_EXPENSES {
            out.push(
                "📊 Você tem muitas despesas fixas. Considere consolidar serviços ou cancelar \
                 assinaturas não utilizadas."
                    .to_string(),
            );
        }

        out
    }

    fn in_window(expense: &VariableExpense, today: NaiveDate) -> bool {
        let months_diff = (i64::from(today.year()) - i64::from(expense.year)) * 12
            + (i64::from(today.month()) - i64::from(expense.month));
        (0..VARIABLE_WINDOW_MONTHS).contains(&months_diff)
    }

    // ── Mutations ───────────────────────────────────────────────────

    pub fn set_monthly_income(&self, data: &mut FinancialData, income: f64) -> Result<(), CoreError> {
        if !income.is_finite() || income < 0.0 {
            return Err(CoreError::ValidationError(
                "Monthly income must be a non-negative amount".into(),
            ));
        }
        data.monthly_income = income;
        Ok(())
    }

    pub fn set_salary_date(&self, data: &mut FinancialData, day: u8) -> Result<(), CoreError> {
        Self::validate_day_of_month(day, "Salary date")?;
        data.salary_date = day;
        Ok(())
    }

    /// Append a fixed expense after validating it.
    pub fn add_fixed_expense(
        &self,
        data: &mut FinancialData,
        expense: FixedExpense,
    ) -> Result<(), CoreError> {
        Self::validate_name_and_amount(&expense.name, expense.amount)?;
        Self::validate_day_of_month(expense.due_date, "Due date")?;
        data.fixed_expenses.push(expense);
        Ok(())
    }

    /// Append a variable expense after validating it.
    pub fn add_variable_expense(
        &self,
        data: &mut FinancialData,
        expense: VariableExpense,
    ) -> Result<(), CoreError> {
        Self::validate_name_and_amount(&expense.name, expense.amount)?;
        if !(1..=12).contains(&expense.month) {
            return Err(CoreError::ValidationError(format!(
                "Month {} must be between 1 and 12",
                expense.month
            )));
        }
        data.variable_expenses.push(expense);
        Ok(())
    }

    /// Remove a fixed expense by id. Returns the removed expense.
    pub fn remove_fixed_expense(
        &self,
        data: &mut FinancialData,
        id: &str,
    ) -> Result<FixedExpense, CoreError> {
        let idx = data
            .fixed_expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CoreError::ExpenseNotFound(id.to_string()))?;
        Ok(data.fixed_expenses.remove(idx))
    }

    /// Remove a variable expense by id. Returns the removed expense.
    pub fn remove_variable_expense(
        &self,
        data: &mut FinancialData,
        id: &str,
    ) -> Result<VariableExpense, CoreError> {
        let idx = data
            .variable_expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CoreError::ExpenseNotFound(id.to_string()))?;
        Ok(data.variable_expenses.remove(idx))
    }

    fn validate_name_and_amount(name: &str, amount: f64) -> Result<(), CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::ValidationError("Expense name must not be empty".into()));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::ValidationError(
                "Expense amount must be positive".into(),
            ));
        }
        Ok(())
    }

    fn validate_day_of_month(day: u8, what: &str) -> Result<(), CoreError> {
        if !(1..=31).contains(&day) {
            return Err(CoreError::ValidationError(format!(
                "{what} {day} must be a day of month between 1 and 31"
            )));
        }
        Ok(())
    }
}

impl Default for BudgetService {
    fn default() -> Self {
        Self::new()
    }
}
